/// This library uses a simple discrete time model.
///
/// Time values are signed: latest-start bounds of the form `t - 1`
/// may legitimately drop below zero, which must render a candidate
/// ineligible rather than wrap around.
pub type Time = i64;

/// Syntactic sugar to give a hint that a time value indicates a
/// point in time or some offset.
pub type Instant = Time;

/// Syntactic sugar to give a hint that a time value denotes an
/// interval length (e.g., an execution cost or a response time).
pub type Duration = Time;

/// The time value that stands in for "+∞" in all time bounds.
///
/// It must exceed the length of any feasible schedule of the
/// analyzed job set.
pub const INFINITY: Time = 100_000;
