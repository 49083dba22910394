use super::style::{ChartStyle, Margin};
use super::ticks::{self, DEFAULT_TICK_COUNT};
use super::{LinearScale, PricePoint, SeriesKind, TimeScale, filtered_points};
use crate::selection::Selection;

use enum_map::EnumMap;
use exchange::RawRecord;
use iced_core::{Color, Point, Rectangle, Size};

/// Cardinal spline tension; zero gives Catmull-Rom-like curves through every point.
const TENSION: f32 = 0.0;
const LEGEND_GAP: f32 = 20.0;
const LEGEND_ROW: f32 = 20.0;
const SWATCH_SIZE: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    CubicTo {
        control_a: Point,
        control_b: Point,
        to: Point,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Distance along the axis, in plot coordinates.
    pub offset: f32,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub range: (f32, f32),
    pub ticks: Vec<Tick>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    /// Index into [`Scene::points`].
    pub index: usize,
    pub kind: SeriesKind,
    pub center: Point,
    pub radius: f32,
}

impl Marker {
    pub fn contains(&self, point: Point) -> bool {
        self.center.distance(point) <= self.radius
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesScene {
    pub kind: SeriesKind,
    pub color: Color,
    pub stroke_width: f32,
    pub path: Vec<PathSegment>,
    pub markers: Vec<Marker>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub kind: SeriesKind,
    pub label: String,
    pub color: Color,
    /// Relative to [`Legend::origin`].
    pub swatch: Rectangle,
    pub label_position: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    /// Relative to the plot origin.
    pub origin: Point,
    pub entries: Vec<LegendEntry>,
}

/// Everything one render pass draws, in plot coordinates (origin at the
/// top-left corner inside the margins).
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub frame: Size,
    pub margin: Margin,
    pub plot: Size,
    pub x_scale: Option<TimeScale>,
    pub y_scale: Option<LinearScale>,
    pub x_axis: Option<Axis>,
    pub y_axis: Option<Axis>,
    pub series: EnumMap<SeriesKind, SeriesScene>,
    pub legend: Legend,
    pub points: Vec<PricePoint>,
}

impl Scene {
    pub fn build(records: &[RawRecord], selection: &Selection, style: &ChartStyle) -> Self {
        Self::from_points(filtered_points(records, selection), style)
    }

    pub fn from_points(points: Vec<PricePoint>, style: &ChartStyle) -> Self {
        let plot = style.plot_size();

        let x_scale = TimeScale::from_points(&points, (0.0, plot.width));
        let y_scale = LinearScale::from_points(&points, (plot.height, 0.0));

        let x_axis = x_scale.map(|scale| {
            let (min, max) = scale.domain();
            let ticks = ticks::time_ticks(min, max, DEFAULT_TICK_COUNT)
                .into_iter()
                .map(|date| Tick {
                    offset: scale.map(date),
                    label: ticks::format_date_tick(date),
                })
                .collect();
            Axis {
                range: scale.range(),
                ticks,
            }
        });

        let y_axis = y_scale.map(|scale| {
            let (min, max) = scale.domain();
            let (values, step) = ticks::linear_ticks(min, max, DEFAULT_TICK_COUNT);
            let ticks = values
                .into_iter()
                .map(|value| Tick {
                    offset: scale.map(value),
                    label: ticks::format_price_tick(value, step),
                })
                .collect();
            Axis {
                range: scale.range(),
                ticks,
            }
        });

        let series = EnumMap::from_fn(|kind: SeriesKind| {
            let projected: Vec<Point> = match (x_scale, y_scale) {
                (Some(x), Some(y)) => points
                    .iter()
                    .map(|p| Point::new(x.map(p.date), y.map(kind.value(p))))
                    .collect(),
                _ => Vec::new(),
            };

            let markers = projected
                .iter()
                .enumerate()
                .filter(|(_, p)| is_finite(**p))
                .map(|(index, center)| Marker {
                    index,
                    kind,
                    center: *center,
                    radius: style.marker_radius,
                })
                .collect();

            SeriesScene {
                kind,
                color: style.color(kind),
                stroke_width: style.stroke_width,
                path: cardinal_path(&projected),
                markers,
            }
        });

        let legend = Legend {
            origin: Point::new(plot.width + LEGEND_GAP, style.margin.top),
            entries: SeriesKind::ALL
                .iter()
                .enumerate()
                .map(|(i, kind)| {
                    let row = i as f32 * LEGEND_ROW;
                    LegendEntry {
                        kind: *kind,
                        label: kind.to_string(),
                        color: style.color(*kind),
                        swatch: Rectangle::new(
                            Point::new(0.0, row),
                            Size::new(SWATCH_SIZE, SWATCH_SIZE),
                        ),
                        label_position: Point::new(SWATCH_SIZE + 5.0, row + 9.0),
                    }
                })
                .collect(),
        };

        Scene {
            frame: style.frame_size(),
            margin: style.margin,
            plot,
            x_scale,
            y_scale,
            x_axis,
            y_axis,
            series,
            legend,
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn marker_count(&self) -> usize {
        self.series.values().map(|s| s.markers.len()).sum()
    }

    /// Topmost marker under `position` (plot coordinates). Close markers are
    /// drawn last, so they win over Open ones.
    pub fn marker_at(&self, position: Point) -> Option<&Marker> {
        [SeriesKind::Close, SeriesKind::Open]
            .iter()
            .find_map(|kind| {
                self.series[*kind]
                    .markers
                    .iter()
                    .rev()
                    .find(|m| m.contains(position))
            })
    }

    pub fn point(&self, marker: &Marker) -> Option<&PricePoint> {
        self.points.get(marker.index)
    }
}

fn is_finite(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

/// Smooth path through `points` as cubic Béziers. Non-finite points break the
/// line and every finite run is curved on its own.
pub fn cardinal_path(points: &[Point]) -> Vec<PathSegment> {
    let mut segments = Vec::new();

    for run in points.split(|p| !is_finite(*p)) {
        match run {
            [] => {}
            [only] => segments.push(PathSegment::MoveTo(*only)),
            [from, to] => {
                segments.push(PathSegment::MoveTo(*from));
                segments.push(PathSegment::LineTo(*to));
            }
            _ => cardinal_run(run, &mut segments),
        }
    }

    segments
}

fn cardinal_run(run: &[Point], segments: &mut Vec<PathSegment>) {
    let k = (1.0 - TENSION) / 6.0;
    let last = run.len() - 1;

    segments.push(PathSegment::MoveTo(run[0]));

    for i in 0..last {
        let current = run[i];
        let following = run[i + 1];
        // ends reuse their neighbour so the tangent there is flat
        let previous = if i == 0 { following } else { run[i - 1] };
        let next = run.get(i + 2).copied().unwrap_or(current);

        segments.push(PathSegment::CubicTo {
            control_a: Point::new(
                current.x + k * (following.x - previous.x),
                current.y + k * (following.y - previous.y),
            ),
            control_b: Point::new(
                following.x + k * (current.x - next.x),
                following.y + k * (current.y - next.y),
            ),
            to: following,
        });
    }
}
