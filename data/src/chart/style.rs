use super::SeriesKind;
use crate::config::theme::hex_color;

use iced_core::{Color, Size};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Margin {
    fn default() -> Self {
        Margin {
            top: 20.0,
            right: 80.0,
            bottom: 50.0,
            left: 50.0,
        }
    }
}

/// Geometry and colors of the price chart, persisted with the rest of the app state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub width: f32,
    pub height: f32,
    pub margin: Margin,
    #[serde(with = "hex_color")]
    pub open_color: Color,
    #[serde(with = "hex_color")]
    pub close_color: Color,
    pub marker_radius: f32,
    pub stroke_width: f32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        ChartStyle {
            width: 600.0,
            height: 400.0,
            margin: Margin::default(),
            open_color: Color::from_rgb8(0xb2, 0xdf, 0x8a),
            close_color: Color::from_rgb8(0xe4, 0x1a, 0x1c),
            marker_radius: 4.0,
            stroke_width: 2.0,
        }
    }
}

impl ChartStyle {
    pub fn color(&self, kind: SeriesKind) -> Color {
        match kind {
            SeriesKind::Open => self.open_color,
            SeriesKind::Close => self.close_color,
        }
    }

    /// Drawable area inside the margins, never negative.
    pub fn plot_size(&self) -> Size {
        Size::new(
            (self.width - self.margin.left - self.margin.right).max(0.0),
            (self.height - self.margin.top - self.margin.bottom).max(0.0),
        )
    }

    pub fn frame_size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_plot_area() {
        let style = ChartStyle::default();
        assert_eq!(style.plot_size(), Size::new(470.0, 330.0));
        assert_eq!(style.color(SeriesKind::Open).into_rgba8(), [0xb2, 0xdf, 0x8a, 0xff]);
        assert_eq!(style.color(SeriesKind::Close).into_rgba8(), [0xe4, 0x1a, 0x1c, 0xff]);
    }

    #[test]
    fn colors_persist_as_hex() {
        let json = serde_json::to_value(ChartStyle::default()).unwrap();
        assert_eq!(json["open_color"], "#b2df8a");
        assert_eq!(json["close_color"], "#e41a1c");

        let partial: ChartStyle =
            serde_json::from_str(r##"{ "width": 800.0, "close_color": "#000000" }"##).unwrap();
        assert_eq!(partial.width, 800.0);
        assert_eq!(partial.height, 400.0);
        assert_eq!(partial.close_color, Color::BLACK);
    }

    #[test]
    fn tiny_frames_clamp_plot_area() {
        let style = ChartStyle {
            width: 100.0,
            height: 40.0,
            ..ChartStyle::default()
        };
        assert_eq!(style.plot_size(), Size::new(0.0, 0.0));
    }
}
