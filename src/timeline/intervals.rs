use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use super::scale::quarter_of;
use crate::types::{TimeRange, TimeScale};

/// Left edges of the timeline columns, one scale unit apart.
///
/// Every element is computed from the range start directly, so month-end clamping
/// never accumulates. Clone the iterator to walk the columns again.
#[derive(Debug, Clone)]
pub struct Intervals {
    range: TimeRange,
    scale: TimeScale,
    index: i64,
    last: Option<DateTime<Utc>>,
}

impl Iterator for Intervals {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.scale.add(self.range.start, self.index);
        if let Some(last) = self.last {
            // Stop past the end, or once arithmetic saturates.
            if current > self.range.end || current <= last {
                return None;
            }
        }
        self.index += 1;
        self.last = Some(current);
        Some(current)
    }
}

/// Column edges covering `range`. Always yields at least one element.
pub fn intervals(range: TimeRange, scale: TimeScale) -> Intervals {
    Intervals {
        range,
        scale,
        index: 0,
        last: None,
    }
}

/// A timeline column: its left edge, the calendar bucket that edge falls in, and a
/// header label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeInterval {
    pub start: DateTime<Utc>,
    pub bucket: DateTime<Utc>,
    pub label: String,
}

/// Header label for the bucket starting at `date`.
pub fn interval_label(date: DateTime<Utc>, scale: TimeScale) -> String {
    match scale {
        TimeScale::Day => date.format("%b %-d").to_string(),
        TimeScale::Week => format!("Week of {}", date.format("%b %-d")),
        TimeScale::Month => date.format("%b %Y").to_string(),
        TimeScale::Quarter => format!("Q{} {}", quarter_of(date), date.year()),
        TimeScale::Year => date.year().to_string(),
    }
}

pub fn labelled_intervals(range: TimeRange, scale: TimeScale) -> Vec<TimeInterval> {
    intervals(range, scale)
        .map(|start| {
            let bucket = scale.bucket_start(start);
            TimeInterval {
                start,
                bucket,
                label: interval_label(bucket, scale),
            }
        })
        .collect()
}
