use chrono::{DateTime, Utc};

use crate::types::{TimeRange, TimeScale};

/// Horizontal placement of `date` within `range`, as a percentage in `[0, 100]`.
///
/// The elapsed units are continuous while the width of the range is the floored
/// whole-unit span (at least one), so dates past the last full unit clamp to 100.
pub fn position(date: DateTime<Utc>, range: &TimeRange, scale: TimeScale) -> f64 {
    let span = scale.span_units(range.start, range.end) as f64;
    let elapsed = scale.fractional_units_between(range.start, date);
    (elapsed / span * 100.0).clamp(0.0, 100.0)
}

/// [`position`] rounded to the integer percentage used as a cluster key.
pub fn rounded_position(date: DateTime<Utc>, range: &TimeRange, scale: TimeScale) -> u32 {
    position(date, range, scale).round() as u32
}
