pub mod scale;
pub mod scene;
pub mod style;
pub mod ticks;

use crate::selection::{Month, Selection};

use chrono::{DateTime, NaiveDate};
use enum_map::Enum;
use exchange::RawRecord;
use serde::{Deserialize, Serialize};

pub use scale::{LinearScale, TimeScale};
pub use scene::Scene;
pub use style::ChartStyle;

/// One filtered, parsed row of the chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub open: f64,
    pub close: f64,
}

impl PricePoint {
    pub fn difference(&self) -> f64 {
        self.close - self.open
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Deserialize, Serialize)]
pub enum SeriesKind {
    Open,
    Close,
}

impl SeriesKind {
    pub const ALL: [SeriesKind; 2] = [SeriesKind::Open, SeriesKind::Close];

    pub fn value(self, point: &PricePoint) -> f64 {
        match self {
            SeriesKind::Open => point.open,
            SeriesKind::Close => point.close,
        }
    }
}

impl std::fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesKind::Open => write!(f, "Open"),
            SeriesKind::Close => write!(f, "Close"),
        }
    }
}

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Parses the longest leading decimal literal, `NaN` when there is none.
///
/// `"101.5"`, `" 7e2 "` and `"42abc"` all yield numbers; `"n/a"` and `""` do not.
pub fn parse_price(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    if s[end..].starts_with("Infinity") {
        return match bytes.first() {
            Some(b'-') => f64::NEG_INFINITY,
            _ => f64::INFINITY,
        };
    }

    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut mantissa_digits = end - digits_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        end = frac_end;
    }

    if mantissa_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().unwrap_or(f64::NAN)
}

pub fn matches(record: &RawRecord, selection: &Selection) -> bool {
    record.is_company(selection.company())
        && parse_date(&record.date).is_some_and(|date| Month::of(&date) == selection.month())
}

/// Records of the selected company dated in the selected month, in input order.
pub fn filter<'a>(records: &'a [RawRecord], selection: &Selection) -> Vec<&'a RawRecord> {
    records
        .iter()
        .filter(|record| matches(record, selection))
        .collect()
}

pub fn project(records: &[&RawRecord]) -> Vec<PricePoint> {
    records
        .iter()
        .filter_map(|record| {
            Some(PricePoint {
                date: parse_date(&record.date)?,
                open: parse_price(&record.open),
                close: parse_price(&record.close),
            })
        })
        .collect()
}

pub fn filtered_points(records: &[RawRecord], selection: &Selection) -> Vec<PricePoint> {
    project(&filter(records, selection))
}
