use crate::util::format_with_commas;

use chrono::{Datelike, NaiveDate, Weekday};

/// Roughly how many ticks an axis aims for.
pub const DEFAULT_TICK_COUNT: usize = 10;

/// Compute a "nice" step close to range/target using 1/2/5*10^k
pub fn nice_step(range: f64, target: usize) -> f64 {
    let target = target.max(1) as f64;
    let raw = range / target;
    let power = raw.log10().floor();
    let base = 10f64.powf(power);
    let n = raw / base;
    let nice = if n >= 50f64.sqrt() {
        10.0
    } else if n >= 10f64.sqrt() {
        5.0
    } else if n >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// Multiples of a nice step that fall inside `[min, max]`, plus that step.
///
/// A zero-width domain yields its single value and a zero step; non-finite
/// bounds yield nothing.
pub fn linear_ticks(min: f64, max: f64, target: usize) -> (Vec<f64>, f64) {
    if !(min.is_finite() && max.is_finite()) {
        return (Vec::new(), 0.0);
    }
    if min == max {
        return (vec![min], 0.0);
    }
    let (min, max) = if min < max { (min, max) } else { (max, min) };

    let step = nice_step(max - min, target);
    if !step.is_finite() || step <= 0.0 {
        return (Vec::new(), 0.0);
    }

    // integer multiples keep 0.1 * 3 from drifting to 0.30000000000000004
    let value_at = |i: f64| {
        if step >= 1.0 {
            i * step
        } else {
            i / (1.0 / step).round()
        }
    };

    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;

    let ticks = (first..=last).map(|i| value_at(i as f64)).collect();
    (ticks, step)
}

/// Decimals needed to tell ticks `step` apart.
pub fn step_precision(step: f64) -> usize {
    if step <= 0.0 || !step.is_finite() {
        return 0;
    }
    (-step.log10().floor()).max(0.0) as usize
}

pub fn format_price_tick(value: f64, step: f64) -> String {
    format_with_commas(value, step_precision(step))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeInterval {
    Days(u32),
    Week,
    Months(u32),
    Years(u32),
}

impl TimeInterval {
    const CANDIDATES: [TimeInterval; 6] = [
        TimeInterval::Days(1),
        TimeInterval::Days(2),
        TimeInterval::Week,
        TimeInterval::Months(1),
        TimeInterval::Months(3),
        TimeInterval::Years(1),
    ];

    fn approx_days(self) -> f64 {
        match self {
            TimeInterval::Days(n) => f64::from(n),
            TimeInterval::Week => 7.0,
            TimeInterval::Months(n) => 30.0 * f64::from(n),
            TimeInterval::Years(n) => 365.0 * f64::from(n),
        }
    }

    /// Interval whose length is closest (by ratio) to `span_days / target`.
    pub fn for_span(span_days: i64, target: usize) -> Self {
        let wanted = span_days as f64 / target.max(1) as f64;
        let candidates = Self::CANDIDATES;

        let idx = candidates.partition_point(|c| c.approx_days() <= wanted);
        if idx == 0 {
            return candidates[0];
        }
        if idx == candidates.len() {
            // past a single year the step in years is a nice 1/2/5 multiple
            let years = nice_step(span_days as f64 / 365.0, target).round().max(1.0);
            return TimeInterval::Years(years as u32);
        }

        let below = candidates[idx - 1];
        let above = candidates[idx];
        if wanted / below.approx_days() < above.approx_days() / wanted {
            below
        } else {
            above
        }
    }

    /// Whether `date` is a boundary of this interval.
    pub fn is_boundary(self, date: NaiveDate) -> bool {
        match self {
            TimeInterval::Days(n) => date.day0() % n.max(1) == 0,
            TimeInterval::Week => date.weekday() == Weekday::Sun,
            TimeInterval::Months(n) => date.day() == 1 && date.month0() % n.max(1) == 0,
            TimeInterval::Years(n) => {
                date.ordinal() == 1 && date.year().rem_euclid(n.max(1) as i32) == 0
            }
        }
    }
}

/// Day-aligned ticks between `min` and `max` inclusive.
pub fn time_ticks(min: NaiveDate, max: NaiveDate, target: usize) -> Vec<NaiveDate> {
    if min == max {
        return vec![min];
    }
    let (min, max) = if min < max { (min, max) } else { (max, min) };

    let interval = TimeInterval::for_span((max - min).num_days(), target);

    min.iter_days()
        .take_while(|date| *date <= max)
        .filter(|date| interval.is_boundary(*date))
        .collect()
}

pub fn format_date_tick(date: NaiveDate) -> String {
    date.format("%d-%b").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nov(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 11, day).unwrap()
    }

    #[test]
    fn nice_steps() {
        assert_eq!(nice_step(15.0, 10), 2.0);
        assert_eq!(nice_step(100.0, 10), 10.0);
        assert_eq!(nice_step(30.0, 10), 2.0);
        assert_eq!(nice_step(40.0, 10), 5.0);
        assert!((nice_step(1.2, 10) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn ticks_stay_inside_the_domain() {
        let (ticks, step) = linear_ticks(95.0, 110.0, DEFAULT_TICK_COUNT);

        assert_eq!(step, 2.0);
        assert_eq!(
            ticks,
            vec![96.0, 98.0, 100.0, 102.0, 104.0, 106.0, 108.0, 110.0]
        );
    }

    #[test]
    fn fractional_steps_do_not_drift() {
        let (ticks, step) = linear_ticks(0.0, 1.0, DEFAULT_TICK_COUNT);

        assert!((step - 0.1).abs() < 1e-12);
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[3], 0.3);
    }

    #[test]
    fn degenerate_linear_domains() {
        assert_eq!(linear_ticks(5.0, 5.0, 10), (vec![5.0], 0.0));
        assert_eq!(linear_ticks(f64::NAN, 5.0, 10).0, Vec::<f64>::new());
        assert_eq!(linear_ticks(0.0, f64::INFINITY, 10).0, Vec::<f64>::new());
    }

    #[test]
    fn tick_labels_follow_step_precision() {
        assert_eq!(format_price_tick(100.0, 2.0), "100");
        assert_eq!(format_price_tick(100.5, 0.5), "100.5");
        assert_eq!(format_price_tick(0.25, 0.05), "0.25");
        assert_eq!(format_price_tick(1500.0, 100.0), "1,500");
    }

    #[test]
    fn month_long_span_ticks_every_other_day() {
        assert_eq!(TimeInterval::for_span(29, 10), TimeInterval::Days(2));

        let ticks = time_ticks(nov(1), nov(30), 10);
        assert_eq!(ticks.first(), Some(&nov(1)));
        assert_eq!(ticks.last(), Some(&nov(29)));
        assert!(ticks.iter().all(|d| d.day() % 2 == 1));
    }

    #[test]
    fn short_spans_tick_daily() {
        assert_eq!(TimeInterval::for_span(4, 10), TimeInterval::Days(1));
        assert_eq!(time_ticks(nov(1), nov(3), 10), vec![nov(1), nov(2), nov(3)]);
    }

    #[test]
    fn long_spans_use_coarser_intervals() {
        assert_eq!(TimeInterval::for_span(70, 10), TimeInterval::Week);
        assert_eq!(TimeInterval::for_span(300, 10), TimeInterval::Months(1));
        assert_eq!(TimeInterval::for_span(5000, 10), TimeInterval::Years(1));
    }

    #[test]
    fn century_spans_step_by_decades() {
        let start = NaiveDate::from_ymd_opt(1900, 11, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 11, 30).unwrap();

        assert_eq!(
            TimeInterval::for_span((end - start).num_days(), 10),
            TimeInterval::Years(10)
        );

        let ticks = time_ticks(start, end, 10);
        assert_eq!(ticks.len(), 12);
        assert_eq!(ticks.first(), NaiveDate::from_ymd_opt(1910, 1, 1).as_ref());
        assert_eq!(ticks.last(), NaiveDate::from_ymd_opt(2020, 1, 1).as_ref());
    }

    #[test]
    fn single_date_domain_has_one_tick() {
        assert_eq!(time_ticks(nov(5), nov(5), 10), vec![nov(5)]);
    }

    #[test]
    fn date_labels() {
        assert_eq!(format_date_tick(nov(5)), "05-Nov");
    }
}
