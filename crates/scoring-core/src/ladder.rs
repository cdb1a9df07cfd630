//! Piecewise step functions ("ladders") that map a raw metric to points.
//!
//! A ladder is an ordered table of `(bound, points)` rows. Evaluation returns
//! the points of the first row whose bound contains the value, or the
//! ladder's fallback when none does. NaN never matches a bound.

/// Substitute `default` for a missing metric.
pub fn safe_number(value: Option<f64>, default: f64) -> f64 {
    value.unwrap_or(default)
}

/// Clamp a component to `[0, cap]`.
pub fn capped(points: f64, cap: f64) -> f64 {
    points.clamp(0.0, cap)
}

/// `points` as a percentage of `max`, used as an insight ranking key.
pub fn share(points: f64, max: f64) -> f64 {
    if max > 0.0 {
        (points / max) * 100.0
    } else {
        0.0
    }
}

/// Percentage change of `value` relative to `base`. Callers guard `base > 0`.
pub fn pct_diff(value: f64, base: f64) -> f64 {
    ((value - base) / base) * 100.0
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// `v >= x`
    AtLeast(f64),
    /// `v > x`
    Above(f64),
    /// `v < x`
    Below(f64),
    /// `v <= x`
    AtMost(f64),
    /// `lo <= v <= hi`
    Between(f64, f64),
}

impl Bound {
    pub fn contains(&self, v: f64) -> bool {
        match *self {
            Bound::AtLeast(x) => v >= x,
            Bound::Above(x) => v > x,
            Bound::Below(x) => v < x,
            Bound::AtMost(x) => v <= x,
            Bound::Between(lo, hi) => v >= lo && v <= hi,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub bound: Bound,
    pub points: f64,
}

impl Step {
    pub const fn at_least(x: f64, points: f64) -> Self {
        Self { bound: Bound::AtLeast(x), points }
    }

    pub const fn above(x: f64, points: f64) -> Self {
        Self { bound: Bound::Above(x), points }
    }

    pub const fn below(x: f64, points: f64) -> Self {
        Self { bound: Bound::Below(x), points }
    }

    pub const fn at_most(x: f64, points: f64) -> Self {
        Self { bound: Bound::AtMost(x), points }
    }

    pub const fn between(lo: f64, hi: f64, points: f64) -> Self {
        Self { bound: Bound::Between(lo, hi), points }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ladder {
    steps: &'static [Step],
    fallback: f64,
}

impl Ladder {
    pub const fn new(steps: &'static [Step]) -> Self {
        Self { steps, fallback: 0.0 }
    }

    pub const fn with_fallback(steps: &'static [Step], fallback: f64) -> Self {
        Self { steps, fallback }
    }

    pub fn score(&self, value: f64) -> f64 {
        self.steps
            .iter()
            .find(|step| step.bound.contains(value))
            .map_or(self.fallback, |step| step.points)
    }
}
