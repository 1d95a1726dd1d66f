use chrono::{DateTime, Utc};

use crate::types::{Commit, TimeRange, TimeScale};

/// Compute the visualised window for a set of commit dates.
///
/// The window spans the earliest to the latest date, padded outward by one unit of
/// `scale`. An empty set collapses to the single instant `now`.
pub fn compute_time_range_at(
    dates: &[DateTime<Utc>],
    scale: TimeScale,
    now: DateTime<Utc>,
) -> TimeRange {
    let (Some(min), Some(max)) = (dates.iter().min(), dates.iter().max()) else {
        return TimeRange::instant(now);
    };

    TimeRange {
        start: scale.add(*min, -1),
        end: scale.add(*max, 1),
    }
}

/// [`compute_time_range_at`] evaluated against the current wall clock.
pub fn compute_time_range(dates: &[DateTime<Utc>], scale: TimeScale) -> TimeRange {
    compute_time_range_at(dates, scale, Utc::now())
}

pub fn time_range_for_commits(
    commits: &[Commit],
    scale: TimeScale,
    now: DateTime<Utc>,
) -> TimeRange {
    let dates: Vec<DateTime<Utc>> = commits.iter().map(|c| c.date).collect();
    compute_time_range_at(&dates, scale, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_month_padding() {
        let dates = vec![at(2024, 6, 1), at(2024, 1, 1), at(2024, 1, 2)];
        let range = compute_time_range(&dates, TimeScale::Month);
        assert_eq!(
            range,
            TimeRange {
                start: at(2023, 12, 1),
                end: at(2024, 7, 1),
            }
        );
    }

    #[test]
    fn test_padding_per_scale() {
        let dates = vec![at(2024, 3, 10), at(2024, 3, 20)];
        let expected = [
            (TimeScale::Day, at(2024, 3, 9), at(2024, 3, 21)),
            (TimeScale::Week, at(2024, 3, 3), at(2024, 3, 27)),
            (TimeScale::Month, at(2024, 2, 10), at(2024, 4, 20)),
            (TimeScale::Quarter, at(2023, 12, 10), at(2024, 6, 20)),
            (TimeScale::Year, at(2023, 3, 10), at(2025, 3, 20)),
        ];
        for (scale, start, end) in expected {
            assert_eq!(compute_time_range(&dates, scale), TimeRange { start, end }, "{scale}");
        }
    }

    #[test]
    fn test_range_covers_all_dates() {
        let dates = vec![at(2021, 5, 31), at(2019, 2, 28), at(2024, 12, 31)];
        for scale in TimeScale::ALL {
            let range = compute_time_range(&dates, scale);
            assert!(dates.iter().all(|d| range.contains(*d)), "{scale}");
            assert!(range.start < at(2019, 2, 28));
            assert!(range.end > at(2024, 12, 31));
        }
    }

    #[test]
    fn test_empty_is_instant() {
        let now = at(2026, 10, 19);
        let range = compute_time_range_at(&[], TimeScale::Week, now);
        assert_eq!(range, TimeRange::instant(now));
    }
}
