use crate::style;

use data::chart::scene::{Axis, Legend, Marker, PathSegment, SeriesScene};
use data::chart::{Scene, SeriesKind};
use data::config::theme::brighten;
use data::hover::{Hover, Tooltip};

use iced::advanced::widget::tree::{self, Tree};
use iced::advanced::{self, Clipboard, Layout, Shell, Widget, layout, renderer};
use iced::theme::palette::Extended;
use iced::widget::canvas;
use iced::{Element, Event, Length, Point, Rectangle, Renderer, Size, Theme, Vector, mouse, window};

const TEXT_SIZE: f32 = 12.0;
const TICK_SIZE: f32 = 6.0;
const TICK_PADDING: f32 = 3.0;

const TOOLTIP_PADDING: f32 = 6.0;
const TOOLTIP_LINE_H: f32 = TEXT_SIZE + 4.0;
const CHAR_W: f32 = TEXT_SIZE * 0.6;

/// Extra radius of the marker under the pointer.
const HOVER_GROW: f32 = 2.0;

struct State {
    plot_cache: canvas::Cache,
    axes_cache: canvas::Cache,
    legend_cache: canvas::Cache,
    overlay_cache: canvas::Cache,
    tooltip: Tooltip,
    last_cache_rev: u64,
}

impl Default for State {
    fn default() -> Self {
        Self {
            plot_cache: canvas::Cache::new(),
            axes_cache: canvas::Cache::new(),
            legend_cache: canvas::Cache::new(),
            overlay_cache: canvas::Cache::new(),
            tooltip: Tooltip::default(),
            last_cache_rev: 0,
        }
    }
}

impl State {
    fn clear_all_caches(&mut self) {
        self.plot_cache.clear();
        self.axes_cache.clear();
        self.legend_cache.clear();
        self.overlay_cache.clear();
    }
}

/// Open/close price chart of one [`Scene`], with marker tooltips.
pub struct StockChart<'a> {
    scene: &'a Scene,
    empty_note: Option<String>,
    version: u64,
}

impl<'a> StockChart<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self {
            scene,
            empty_note: None,
            version: 0,
        }
    }

    /// Text drawn over the plot when the scene has no points.
    pub fn empty_note(mut self, note: impl Into<String>) -> Self {
        self.empty_note = Some(note.into());
        self
    }

    /// Bumping the revision makes the widget drop every cached layer.
    pub fn version(mut self, rev: u64) -> Self {
        self.version = rev;
        self
    }

    fn plot_origin(&self) -> Vector {
        Vector::new(self.scene.margin.left, self.scene.margin.top)
    }

    fn plot_local(&self, layout: Layout<'_>, cursor: mouse::Cursor) -> Option<Point> {
        let local = cursor.position_in(layout.bounds())?;
        Some(local - self.plot_origin())
    }
}

impl<M> Widget<M, Theme, Renderer> for StockChart<'_> {
    fn tag(&self) -> tree::Tag {
        tree::Tag::of::<State>()
    }

    fn state(&self) -> tree::State {
        tree::State::new(State::default())
    }

    fn size(&self) -> Size<Length> {
        Size {
            width: Length::Fixed(self.scene.frame.width),
            height: Length::Fixed(self.scene.frame.height),
        }
    }

    fn layout(
        &mut self,
        _tree: &mut Tree,
        _renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        layout::atomic(limits, self.scene.frame.width, self.scene.frame.height)
    }

    fn update(
        &mut self,
        tree: &mut Tree,
        event: &Event,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        _renderer: &Renderer,
        _clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, M>,
        _viewport: &Rectangle,
    ) {
        match event {
            Event::Mouse(mouse::Event::CursorMoved { .. } | mouse::Event::CursorLeft) => {
                let state = tree.state.downcast_mut::<State>();

                let pointer = if shell.is_event_captured() {
                    None
                } else {
                    self.plot_local(layout, cursor)
                };

                if state.tooltip.pointer_moved(self.scene, pointer) {
                    state.overlay_cache.clear();
                    shell.request_redraw();
                }
            }
            Event::Window(window::Event::RedrawRequested(_)) => {
                let state = tree.state.downcast_mut::<State>();

                if state.last_cache_rev != self.version {
                    state.clear_all_caches();
                    state.tooltip.reset();
                    state.last_cache_rev = self.version;
                }
            }
            _ => {}
        }
    }

    fn draw(
        &self,
        tree: &Tree,
        renderer: &mut Renderer,
        theme: &Theme,
        _style: &renderer::Style,
        layout: Layout<'_>,
        _cursor: mouse::Cursor,
        _viewport: &Rectangle,
    ) {
        use advanced::Renderer as _;

        let state = tree.state.downcast_ref::<State>();
        let scene = self.scene;

        let bounds = layout.bounds();
        let palette = theme.extended_palette();
        let plot_origin = self.plot_origin();

        renderer.with_translation(Vector::new(bounds.x, bounds.y), |r| {
            let axes_geom = state.axes_cache.draw(r, bounds.size(), |frame| {
                frame.translate(plot_origin);
                if let Some(axis) = &scene.x_axis {
                    fill_x_axis(frame, axis, scene.plot.height, palette);
                }
                if let Some(axis) = &scene.y_axis {
                    fill_y_axis(frame, axis, palette);
                }
            });

            let plot_geom = state.plot_cache.draw(r, bounds.size(), |frame| {
                frame.translate(plot_origin);
                for kind in SeriesKind::ALL {
                    fill_series(frame, &scene.series[kind]);
                }
                if scene.is_empty()
                    && let Some(note) = &self.empty_note
                {
                    fill_empty_note(frame, note, scene.plot, palette);
                }
            });

            let legend_geom = state.legend_cache.draw(r, bounds.size(), |frame| {
                frame.translate(plot_origin);
                fill_legend(frame, &scene.legend, palette);
            });

            let overlay_geom = state.overlay_cache.draw(r, bounds.size(), |frame| {
                frame.translate(plot_origin);
                if let Hover::Hovering { kind, index } = state.tooltip.hover()
                    && let Some(marker) = scene.series[kind]
                        .markers
                        .iter()
                        .find(|m| m.index == index)
                {
                    fill_hovered_marker(frame, marker, scene.series[kind].color);
                }
                fill_tooltip(frame, &state.tooltip, scene.plot, palette);
            });

            {
                use iced::advanced::graphics::geometry::Renderer as _;
                r.draw_geometry(axes_geom);
                r.draw_geometry(plot_geom);
                r.draw_geometry(legend_geom);
            }

            r.with_layer(
                Rectangle {
                    x: 0.0,
                    y: 0.0,
                    width: bounds.width,
                    height: bounds.height,
                },
                |r| {
                    use iced::advanced::graphics::geometry::Renderer as _;
                    r.draw_geometry(overlay_geom);
                },
            );
        });
    }

    fn mouse_interaction(
        &self,
        _state: &Tree,
        layout: Layout<'_>,
        cursor: advanced::mouse::Cursor,
        _viewport: &Rectangle,
        _renderer: &Renderer,
    ) -> advanced::mouse::Interaction {
        match self.plot_local(layout, cursor) {
            Some(pointer) if self.scene.marker_at(pointer).is_some() => {
                advanced::mouse::Interaction::Pointer
            }
            _ => advanced::mouse::Interaction::default(),
        }
    }
}

impl<'a, M> From<StockChart<'a>> for Element<'a, M, Theme, Renderer>
where
    M: 'a,
{
    fn from(chart: StockChart<'a>) -> Self {
        Element::new(chart)
    }
}

fn fill_series(frame: &mut canvas::Frame, series: &SeriesScene) {
    if !series.path.is_empty() {
        let path = canvas::Path::new(|builder| {
            for segment in &series.path {
                match *segment {
                    PathSegment::MoveTo(p) => builder.move_to(p),
                    PathSegment::LineTo(p) => builder.line_to(p),
                    PathSegment::CubicTo {
                        control_a,
                        control_b,
                        to,
                    } => builder.bezier_curve_to(control_a, control_b, to),
                }
            }
        });

        frame.stroke(
            &path,
            canvas::Stroke::default()
                .with_color(series.color)
                .with_width(series.stroke_width),
        );
    }

    for marker in &series.markers {
        frame.fill(
            &canvas::Path::circle(marker.center, marker.radius),
            series.color,
        );
    }
}

fn fill_hovered_marker(frame: &mut canvas::Frame, marker: &Marker, color: iced::Color) {
    frame.fill(
        &canvas::Path::circle(marker.center, marker.radius + HOVER_GROW),
        brighten(color, 0.2),
    );
}

fn fill_x_axis(frame: &mut canvas::Frame, axis: &Axis, plot_height: f32, palette: &Extended) {
    let stroke = style::axis_line_from_palette(palette);
    let text_color = palette.background.base.text;

    let (start, end) = axis.range;
    frame.stroke(
        &canvas::Path::line(Point::new(start, plot_height), Point::new(end, plot_height)),
        stroke,
    );

    for tick in &axis.ticks {
        frame.stroke(
            &canvas::Path::line(
                Point::new(tick.offset, plot_height),
                Point::new(tick.offset, plot_height + TICK_SIZE),
            ),
            stroke,
        );

        frame.with_save(|frame| {
            frame.translate(Vector::new(
                tick.offset,
                plot_height + TICK_SIZE + TICK_PADDING,
            ));
            frame.rotate(std::f32::consts::FRAC_PI_4);
            frame.fill_text(canvas::Text {
                content: tick.label.clone(),
                position: Point::ORIGIN,
                color: text_color,
                size: TEXT_SIZE.into(),
                align_x: iced::Alignment::Start.into(),
                align_y: iced::Alignment::Center.into(),
                ..Default::default()
            });
        });
    }
}

fn fill_y_axis(frame: &mut canvas::Frame, axis: &Axis, palette: &Extended) {
    let stroke = style::axis_line_from_palette(palette);
    let text_color = palette.background.base.text;

    let (bottom, top) = axis.range;
    frame.stroke(
        &canvas::Path::line(Point::new(0.0, bottom), Point::new(0.0, top)),
        stroke,
    );

    for tick in &axis.ticks {
        frame.stroke(
            &canvas::Path::line(
                Point::new(-TICK_SIZE, tick.offset),
                Point::new(0.0, tick.offset),
            ),
            stroke,
        );
        frame.fill_text(canvas::Text {
            content: tick.label.clone(),
            position: Point::new(-(TICK_SIZE + TICK_PADDING), tick.offset),
            color: text_color,
            size: TEXT_SIZE.into(),
            align_x: iced::Alignment::End.into(),
            align_y: iced::Alignment::Center.into(),
            ..Default::default()
        });
    }
}

fn fill_legend(frame: &mut canvas::Frame, legend: &Legend, palette: &Extended) {
    let origin = Vector::new(legend.origin.x, legend.origin.y);

    for entry in &legend.entries {
        frame.fill_rectangle(
            entry.swatch.position() + origin,
            entry.swatch.size(),
            entry.color,
        );
        frame.fill_text(canvas::Text {
            content: entry.label.clone(),
            position: entry.label_position + origin,
            color: palette.background.base.text,
            size: TEXT_SIZE.into(),
            align_x: iced::Alignment::Start.into(),
            align_y: iced::Alignment::Center.into(),
            ..Default::default()
        });
    }
}

fn fill_empty_note(frame: &mut canvas::Frame, note: &str, plot: Size, palette: &Extended) {
    frame.fill_text(canvas::Text {
        content: note.to_string(),
        position: Point::new(plot.width * 0.5, plot.height * 0.5),
        color: palette.background.weak.text,
        size: (TEXT_SIZE + 2.0).into(),
        align_x: iced::Alignment::Center.into(),
        align_y: iced::Alignment::Center.into(),
        ..Default::default()
    });
}

fn fill_tooltip(frame: &mut canvas::Frame, tooltip: &Tooltip, plot: Size, palette: &Extended) {
    if !tooltip.is_visible() {
        return;
    }
    let Some(content) = tooltip.content() else {
        return;
    };

    let lines = content.lines();
    let widest = lines.iter().map(|l| l.len()).max().unwrap_or(0) as f32;
    let size = Size::new(
        widest * CHAR_W + TOOLTIP_PADDING * 2.0,
        lines.len() as f32 * TOOLTIP_LINE_H + TOOLTIP_PADDING * 2.0,
    );

    // keep the box on screen near the right edge and the top
    let mut position = tooltip.position();
    if position.x + size.width > plot.width + 80.0 {
        position.x -= size.width + 20.0;
    }
    position.y = position.y.max(-10.0);

    let (background, border) = style::tooltip_colors(palette);
    let opacity = tooltip.opacity();

    frame.fill_rectangle(position, size, background.scale_alpha(opacity));
    frame.stroke(
        &canvas::Path::rectangle(position, size),
        canvas::Stroke::default()
            .with_color(border.scale_alpha(opacity))
            .with_width(1.0),
    );

    for (i, line) in lines.into_iter().enumerate() {
        frame.fill_text(canvas::Text {
            content: line,
            position: Point::new(
                position.x + TOOLTIP_PADDING,
                position.y + TOOLTIP_PADDING + i as f32 * TOOLTIP_LINE_H,
            ),
            color: palette.background.base.text.scale_alpha(opacity),
            size: TEXT_SIZE.into(),
            align_x: iced::Alignment::Start.into(),
            align_y: iced::Alignment::Start.into(),
            ..Default::default()
        });
    }
}
