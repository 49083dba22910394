use crate::Theme;
use crate::chart::ChartStyle;
use crate::util::ok_or_default;

use iced_core::Size;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSpec {
    pub width: f32,
    pub height: f32,
}

impl WindowSpec {
    pub fn from_size(size: Size) -> Self {
        WindowSpec {
            width: size.width,
            height: size.height,
        }
    }

    pub fn into_size(self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl Default for WindowSpec {
    fn default() -> Self {
        WindowSpec {
            width: 760.0,
            height: 560.0,
        }
    }
}

#[derive(Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct State {
    #[serde(deserialize_with = "ok_or_default")]
    pub selected_theme: Theme,
    #[serde(deserialize_with = "ok_or_default")]
    pub chart: ChartStyle,
    #[serde(deserialize_with = "ok_or_default")]
    pub main_window: Option<WindowSpec>,
    #[serde(deserialize_with = "ok_or_default")]
    pub data_file: Option<PathBuf>,
}

impl State {
    pub fn from_parts(
        selected_theme: Theme,
        chart: ChartStyle,
        main_window: Option<WindowSpec>,
        data_file: Option<PathBuf>,
    ) -> Self {
        State {
            selected_theme,
            chart,
            main_window,
            data_file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back() {
        let state: State = serde_json::from_str("{}").unwrap();
        assert_eq!(state.chart, ChartStyle::default());
        assert!(state.main_window.is_none());
        assert!(state.data_file.is_none());
    }

    #[test]
    fn broken_fields_do_not_discard_the_rest() {
        let json = r##"{
            "selected_theme": "not-a-theme",
            "chart": { "open_color": 12 },
            "main_window": { "width": 900.0, "height": 700.0 },
            "data_file": "prices.csv"
        }"##;
        let state: State = serde_json::from_str(json).unwrap();

        assert_eq!(state.selected_theme.0.to_string(), "Tickerline");
        assert_eq!(state.chart, ChartStyle::default());
        assert_eq!(
            state.main_window,
            Some(WindowSpec {
                width: 900.0,
                height: 700.0
            })
        );
        assert_eq!(state.data_file, Some(PathBuf::from("prices.csv")));
    }
}
