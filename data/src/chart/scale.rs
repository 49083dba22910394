use super::PricePoint;

use chrono::NaiveDate;

/// Maps calendar dates linearly onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    domain: (NaiveDate, NaiveDate),
    range: (f32, f32),
}

impl TimeScale {
    pub fn new(domain: (NaiveDate, NaiveDate), range: (f32, f32)) -> Self {
        Self { domain, range }
    }

    /// `None` when there are no points to span.
    pub fn from_points(points: &[PricePoint], range: (f32, f32)) -> Option<Self> {
        let min = points.iter().map(|p| p.date).min()?;
        let max = points.iter().map(|p| p.date).max()?;
        Some(Self::new((min, max), range))
    }

    pub fn domain(&self) -> (NaiveDate, NaiveDate) {
        self.domain
    }

    pub fn range(&self) -> (f32, f32) {
        self.range
    }

    /// Whole days between the domain ends.
    pub fn span_days(&self) -> i64 {
        (self.domain.1 - self.domain.0).num_days()
    }

    pub fn map(&self, date: NaiveDate) -> f32 {
        let (r0, r1) = self.range;
        let span = self.span_days();
        if span == 0 {
            return r0 + (r1 - r0) * 0.5;
        }
        let t = (date - self.domain.0).num_days() as f32 / span as f32;
        r0 + (r1 - r0) * t
    }
}

/// Maps prices linearly onto a pixel range; the range may be inverted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f32, f32),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f32, f32)) -> Self {
        Self { domain, range }
    }

    /// Spans the lowest and highest of both prices over all points.
    ///
    /// A point whose open or close is `NaN` contributes nothing; `None` when no
    /// point is left.
    pub fn from_points(points: &[PricePoint], range: (f32, f32)) -> Option<Self> {
        let mut extent: Option<(f64, f64)> = None;

        for p in points {
            if p.open.is_nan() || p.close.is_nan() {
                continue;
            }
            let (low, high) = (p.open.min(p.close), p.open.max(p.close));
            extent = Some(match extent {
                Some((min, max)) => (min.min(low), max.max(high)),
                None => (low, high),
            });
        }

        let (min, max) = extent?;
        Some(Self::new((min, max), range))
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f32, f32) {
        self.range
    }

    pub fn map(&self, value: f64) -> f32 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 {
            return r0 + (r1 - r0) * 0.5;
        }
        let t = (value - d0) / span;
        r0 + (r1 - r0) * t as f32
    }
}
