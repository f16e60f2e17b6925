//! Recurrence stepping on the naive local calendar.
//!
//! Timestamps are epoch seconds interpreted as local wall-clock values
//! (no timezone handling). Stepping advances a start/end pair by one
//! calendar unit, preserving the time of day.

use chrono::{DateTime, Days, Months, NaiveDateTime};

use crate::event::RecurringPeriod;

/// Advance a start/end pair by one period.
///
/// Month stepping uses calendar rollover with day clamping: Jan 31 plus
/// one month lands on Feb 28 (29 in leap years). If the arithmetic
/// overflows the calendar range, the pair is returned unchanged and the
/// caller's iteration limit bounds the loop.
pub fn step(start: i64, end: i64, period: RecurringPeriod) -> (i64, i64) {
    match (shift(start, period), shift(end, period)) {
        (Some(new_start), Some(new_end)) => (new_start, new_end),
        _ => (start, end),
    }
}

/// One year after a timestamp, used as the default series stop bound.
pub fn plus_one_year(ts: i64) -> Option<i64> {
    let moved = decode(ts)?.checked_add_months(Months::new(12))?;
    Some(moved.and_utc().timestamp())
}

fn shift(ts: i64, period: RecurringPeriod) -> Option<i64> {
    let dt = decode(ts)?;
    let moved = match period {
        RecurringPeriod::Daily => dt.checked_add_days(Days::new(1))?,
        RecurringPeriod::Weekly => dt.checked_add_days(Days::new(7))?,
        RecurringPeriod::Monthly => dt.checked_add_months(Months::new(1))?,
    };
    Some(moved.and_utc().timestamp())
}

fn decode(ts: i64) -> Option<NaiveDateTime> {
    Some(DateTime::from_timestamp(ts, 0)?.naive_utc())
}
