//! Timestamp validation.
//!
//! Host metadata arrives loosely typed (JSON values), so timestamps are
//! validated before any date arithmetic: integers and integer-valued
//! floats pass directly, strings only if they round-trip exactly through
//! an `i64` parse. Partial numeric strings like `"12abc"` are rejected.

use chrono::DateTime;
use serde_json::Value;

/// Check that a loosely typed value is a well-formed integer timestamp.
pub fn is_timestamp(value: &Value) -> bool {
    as_timestamp(value).is_some()
}

/// Extract a timestamp from a loosely typed value, if valid.
pub fn as_timestamp(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i)
            } else if let Some(f) = n.as_f64() {
                // Integer-valued floats only, within i64 range
                if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
                    Some(f as i64)
                } else {
                    None
                }
            } else {
                // u64 beyond i64::MAX
                None
            }
        }
        Value::String(s) => {
            let parsed: i64 = s.parse().ok()?;
            // Exact round-trip: rejects "+5", "007", " 5", "12abc"
            if parsed.to_string() == *s {
                Some(parsed)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Whether a timestamp is representable on the calendar (chrono's
/// datetime range). Gates the expansion loop's date arithmetic.
pub fn in_calendar_range(ts: i64) -> bool {
    DateTime::from_timestamp(ts, 0).is_some()
}
