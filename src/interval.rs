/*! Closed integer intervals and the monotone helpers used to combine them.

All time bounds in a schedule-abstraction graph are closed intervals
`[min, max]` of [Instant]s: release windows, execution-cost ranges,
core availabilities, finish times, and polling points.
*/

use derive_more::Display;

use crate::time::Instant;

/// A closed interval `[min, max]` of discrete time values.
///
/// The type does not enforce `min <= max`; validating externally
/// supplied intervals is the job of [JobTable][crate::job::JobTable].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
#[display(fmt = "[{}, {}]", min, max)]
pub struct Interval {
    pub min: Instant,
    pub max: Instant,
}

impl Interval {
    pub fn new(min: Instant, max: Instant) -> Self {
        Interval { min, max }
    }

    /// The degenerate interval `[t, t]`.
    pub fn point(t: Instant) -> Self {
        Interval { min: t, max: t }
    }

    pub fn is_point(&self) -> bool {
        self.min == self.max
    }

    /// True iff the interval contains no value, i.e., `min > max`.
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    pub fn contains(&self, t: Instant) -> bool {
        self.min <= t && t <= self.max
    }
}

impl From<(Instant, Instant)> for Interval {
    fn from((min, max): (Instant, Instant)) -> Self {
        Interval::new(min, max)
    }
}

/// Where a time value lies relative to an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Before,
    Within,
    After,
}

impl Interval {
    pub fn position_of(&self, t: Instant) -> Position {
        if t < self.min {
            Position::Before
        } else if t > self.max {
            Position::After
        } else {
            Position::Within
        }
    }
}

/// The minimum of a collection of time values, or `default` if the
/// collection is empty.
pub fn min_over<I>(values: I, default: Instant) -> Instant
where
    I: IntoIterator<Item = Instant>,
{
    values.into_iter().min().unwrap_or(default)
}

/// The maximum of a collection of time values, or `default` if the
/// collection is empty.
pub fn max_over<I>(values: I, default: Instant) -> Instant
where
    I: IntoIterator<Item = Instant>,
{
    values.into_iter().max().unwrap_or(default)
}
