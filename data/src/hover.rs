use crate::chart::{PricePoint, Scene, SeriesKind};
use crate::util::format_price;

use chrono::{Datelike, NaiveDate};
use iced_core::{Point, Vector};

/// Offset of the tooltip's top-left corner from the pointer.
pub const TOOLTIP_OFFSET: Vector = Vector::new(10.0, -40.0);

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Hover {
    #[default]
    Idle,
    Hovering { kind: SeriesKind, index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipContent {
    pub date: NaiveDate,
    pub open: f64,
    pub close: f64,
}

impl TooltipContent {
    pub fn from_point(point: &PricePoint) -> Self {
        TooltipContent {
            date: point.date,
            open: point.open,
            close: point.close,
        }
    }

    pub fn lines(&self) -> [String; 4] {
        [
            format!(
                "Date: {}/{}/{}",
                self.date.month(),
                self.date.day(),
                self.date.year()
            ),
            format!("Open: {}", format_price(self.open)),
            format!("Close: {}", format_price(self.close)),
            format!("Difference: {}", format_price(self.close - self.open)),
        ]
    }

    pub fn text(&self) -> String {
        self.lines().join("\n")
    }
}

/// The single tooltip of a chart. Hidden tooltips keep their last content.
#[derive(Debug, Clone, Default)]
pub struct Tooltip {
    hover: Hover,
    content: Option<TooltipContent>,
    position: Point,
    opacity: f32,
}

impl Tooltip {
    pub fn enter(&mut self, kind: SeriesKind, index: usize, point: &PricePoint, pointer: Point) {
        self.hover = Hover::Hovering { kind, index };
        self.content = Some(TooltipContent::from_point(point));
        self.position = pointer + TOOLTIP_OFFSET;
        self.opacity = 1.0;
    }

    pub fn track(&mut self, pointer: Point) {
        if let Hover::Hovering { .. } = self.hover {
            self.position = pointer + TOOLTIP_OFFSET;
        }
    }

    pub fn leave(&mut self) {
        self.hover = Hover::Idle;
        self.opacity = 0.0;
    }

    /// Hides the tooltip when the scene it pointed into is replaced.
    pub fn reset(&mut self) {
        if self.is_visible() {
            log::debug!("Tooltip reset on new chart revision");
        }
        self.leave();
    }

    /// Runs the hover transitions for a pointer position in plot coordinates;
    /// `None` means the pointer left the chart. Returns whether anything changed.
    pub fn pointer_moved(&mut self, scene: &Scene, pointer: Option<Point>) -> bool {
        let target = pointer.and_then(|p| {
            let marker = scene.marker_at(p)?;
            Some((marker, scene.point(marker)?, p))
        });

        match (target, self.hover) {
            (Some((marker, _, p)), Hover::Hovering { kind, index })
                if marker.kind == kind && marker.index == index =>
            {
                let before = self.position;
                self.track(p);
                before != self.position
            }
            (Some((marker, point, p)), _) => {
                self.enter(marker.kind, marker.index, point, p);
                true
            }
            (None, Hover::Hovering { .. }) => {
                self.leave();
                true
            }
            (None, Hover::Idle) => false,
        }
    }

    pub fn hover(&self) -> Hover {
        self.hover
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn content(&self) -> Option<&TooltipContent> {
        self.content.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartStyle;
    use crate::selection::{Month, Selection};
    use exchange::{Company, RawRecord};

    fn scene() -> Scene {
        let records = vec![
            RawRecord::new("2023-11-01", "Apple", "100", "110"),
            RawRecord::new("2023-11-02", "Apple", "105", "95"),
        ];
        Scene::build(
            &records,
            &Selection::new(Company::Apple, Month::November),
            &ChartStyle::default(),
        )
    }

    #[test]
    fn content_lines() {
        let point = PricePoint {
            date: NaiveDate::from_ymd_opt(2023, 11, 2).unwrap(),
            open: 105.0,
            close: 95.0,
        };
        let content = TooltipContent::from_point(&point);

        assert_eq!(
            content.lines(),
            [
                "Date: 11/2/2023",
                "Open: 105.00",
                "Close: 95.00",
                "Difference: -10.00"
            ]
        );

        let gain = TooltipContent {
            open: 100.0,
            close: 110.5,
            ..content
        };
        assert!(gain.text().ends_with("Difference: 10.50"));
    }

    #[test]
    fn hovering_a_marker_shows_its_record() {
        let scene = scene();
        let mut tooltip = Tooltip::default();
        assert!(!tooltip.is_visible());

        let center = scene.series[SeriesKind::Close].markers[1].center;
        assert!(tooltip.pointer_moved(&scene, Some(center)));

        assert_eq!(
            tooltip.hover(),
            Hover::Hovering {
                kind: SeriesKind::Close,
                index: 1
            }
        );
        assert_eq!(tooltip.opacity(), 1.0);
        assert_eq!(tooltip.position(), center + Vector::new(10.0, -40.0));

        let text = tooltip.content().unwrap().text();
        assert!(text.contains("Open: 105.00"));
        assert!(text.contains("Close: 95.00"));
        assert!(text.contains("Difference: -10.00"));
    }

    #[test]
    fn tracking_moves_without_changing_content() {
        let scene = scene();
        let mut tooltip = Tooltip::default();

        let center = scene.series[SeriesKind::Open].markers[0].center;
        tooltip.pointer_moved(&scene, Some(center));
        let content = *tooltip.content().unwrap();

        let nudged = center + Vector::new(1.0, 1.0);
        assert!(tooltip.pointer_moved(&scene, Some(nudged)));
        assert_eq!(tooltip.position(), nudged + TOOLTIP_OFFSET);
        assert_eq!(tooltip.content(), Some(&content));
    }

    #[test]
    fn leaving_hides_but_keeps_content() {
        let scene = scene();
        let mut tooltip = Tooltip::default();

        let center = scene.series[SeriesKind::Open].markers[1].center;
        tooltip.pointer_moved(&scene, Some(center));
        assert!(tooltip.pointer_moved(&scene, Some(Point::new(200.0, 5.0))));

        assert_eq!(tooltip.hover(), Hover::Idle);
        assert!(!tooltip.is_visible());
        assert_eq!(tooltip.content().map(|c| c.open), Some(105.0));

        assert!(!tooltip.pointer_moved(&scene, None));
    }

    #[test]
    fn track_is_ignored_while_idle() {
        let mut tooltip = Tooltip::default();
        tooltip.track(Point::new(50.0, 50.0));
        assert_eq!(tooltip.position(), Point::ORIGIN);
    }

    #[test]
    fn reset_hides_an_active_tooltip() {
        let scene = scene();
        let mut tooltip = Tooltip::default();

        let center = scene.series[SeriesKind::Close].markers[0].center;
        tooltip.pointer_moved(&scene, Some(center));
        tooltip.reset();

        assert_eq!(tooltip.hover(), Hover::Idle);
        assert_eq!(tooltip.opacity(), 0.0);
    }
}
