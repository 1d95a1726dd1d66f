//! Calendar arithmetic for each [`TimeScale`].
//!
//! Durations and bucket identity are deliberately defined differently for quarters:
//! the duration of a quarter is a third of the (fractional) month difference, while
//! a quarter *bucket* always starts on January, April, July or October 1st.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, TimeZone, Utc};

use crate::types::TimeScale;

const MILLIS_PER_DAY: i64 = 86_400_000;

impl TimeScale {
    /// Add `n` units (negative to subtract). Saturates at the representable range.
    pub fn add(&self, date: DateTime<Utc>, n: i64) -> DateTime<Utc> {
        let shifted = match self {
            TimeScale::Day => date.checked_add_signed(Duration::days(n)),
            TimeScale::Week => date.checked_add_signed(Duration::weeks(n)),
            TimeScale::Month => add_months(date, n),
            TimeScale::Quarter => n.checked_mul(3).and_then(|m| add_months(date, m)),
            TimeScale::Year => n.checked_mul(12).and_then(|m| add_months(date, m)),
        };
        shifted.unwrap_or(if n >= 0 {
            DateTime::<Utc>::MAX_UTC
        } else {
            DateTime::<Utc>::MIN_UTC
        })
    }

    /// Whole units from `from` to `to`, floored (negative when `to` precedes `from`).
    pub fn units_between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
        let millis = (to - from).num_milliseconds();
        match self {
            TimeScale::Day => millis.div_euclid(MILLIS_PER_DAY),
            TimeScale::Week => millis.div_euclid(7 * MILLIS_PER_DAY),
            TimeScale::Month => whole_months_between(from, to),
            TimeScale::Quarter => whole_months_between(from, to).div_euclid(3),
            TimeScale::Year => whole_months_between(from, to).div_euclid(12),
        }
    }

    /// Units from `from` to `to` including the elapsed fraction of the current unit.
    ///
    /// Monotonic in `to`, and equal to [`units_between`](Self::units_between) whenever
    /// `to` sits exactly on a unit boundary measured from `from`.
    pub fn fractional_units_between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
        let days = (to - from).num_milliseconds() as f64 / MILLIS_PER_DAY as f64;
        match self {
            TimeScale::Day => days,
            TimeScale::Week => days / 7.0,
            TimeScale::Month => fractional_months_between(from, to),
            TimeScale::Quarter => fractional_months_between(from, to) / 3.0,
            TimeScale::Year => fractional_months_between(from, to) / 12.0,
        }
    }

    /// Width of a range in whole units, never less than one.
    pub fn span_units(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
        self.units_between(from, to).max(1)
    }

    /// Start of the calendar bucket containing `date`.
    pub fn bucket_start(&self, date: DateTime<Utc>) -> DateTime<Utc> {
        let day = date.date_naive();
        let start = match self {
            TimeScale::Day => day,
            TimeScale::Week => {
                day - Duration::days(i64::from(day.weekday().num_days_from_sunday()))
            }
            TimeScale::Month => first_of_month(day.year(), day.month()).unwrap_or(day),
            TimeScale::Quarter => {
                let month = (day.month0() / 3) * 3 + 1;
                first_of_month(day.year(), month).unwrap_or(day)
            }
            TimeScale::Year => first_of_month(day.year(), 1).unwrap_or(day),
        };
        Utc.from_utc_datetime(&start.and_time(chrono::NaiveTime::MIN))
    }

    /// Exclusive end of the calendar bucket containing `date`.
    pub fn bucket_end(&self, date: DateTime<Utc>) -> DateTime<Utc> {
        self.add(self.bucket_start(date), 1)
    }

    pub fn same_bucket(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        self.bucket_start(a) == self.bucket_start(b)
    }

    /// Whether `date` falls inside the bucket that `bucket` belongs to.
    pub fn bucket_contains(&self, bucket: DateTime<Utc>, date: DateTime<Utc>) -> bool {
        let start = self.bucket_start(bucket);
        start <= date && date < self.add(start, 1)
    }
}

/// 1-based calendar quarter of `date`.
pub fn quarter_of(date: DateTime<Utc>) -> u32 {
    date.month0() / 3 + 1
}

fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn add_months(date: DateTime<Utc>, n: i64) -> Option<DateTime<Utc>> {
    let months = Months::new(u32::try_from(n.unsigned_abs()).ok()?);
    if n >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    }
}

fn shift_months(date: DateTime<Utc>, n: i64) -> DateTime<Utc> {
    TimeScale::Month.add(date, n)
}

fn whole_months_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    let estimate = i64::from(to.year() - from.year()) * 12 + i64::from(to.month())
        - i64::from(from.month());
    // The calendar estimate lands in `to`'s month; day and time of day decide whether
    // that month has been completed.
    if shift_months(from, estimate) > to {
        estimate - 1
    } else {
        estimate
    }
}

fn fractional_months_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let whole = whole_months_between(from, to);
    let anchor = shift_months(from, whole);
    let next = shift_months(from, whole + 1);
    let span = (next - anchor).num_milliseconds();
    if span <= 0 {
        return whole as f64;
    }
    let elapsed = (to - anchor).num_milliseconds();
    whole as f64 + elapsed as f64 / span as f64
}
