//! Canonical timestamp derivation.
//!
//! Boards encode times as epoch seconds, epoch milliseconds, digit strings,
//! or ISO-8601, and some omit them entirely. Everything funnels through
//! [`to_epoch_seconds`], which degrades to 0 instead of erroring so one odd
//! timestamp can never sink a refresh pass.

use serde_json::Value;

/// Magnitude cutoff between epoch milliseconds and epoch seconds.
/// 10^10 seconds is year 2286; 10^10 milliseconds is March 2001.
const MILLIS_CUTOFF: i64 = 10_000_000_000;

/// Convert a raw timestamp value of unknown shape to Unix seconds.
/// Unrecognized or pre-epoch input yields 0.
pub fn to_epoch_seconds(raw: &Value) -> i64 {
    let seconds = match raw {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .map(scale)
            .unwrap_or(0),
        Value::String(s) => parse_text(s.trim()),
        _ => 0,
    };
    seconds.max(0)
}

fn parse_text(text: &str) -> i64 {
    if text.is_empty() {
        return 0;
    }
    if text.bytes().all(|b| b.is_ascii_digit()) {
        return text.parse::<i64>().map(scale).unwrap_or(0);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(text) {
        return dt.timestamp();
    }
    // Some boards emit ISO timestamps without an offset; read them as UTC.
    chrono::NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or(0)
}

fn scale(n: i64) -> i64 {
    if n > MILLIS_CUTOFF { n / 1000 } else { n }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::epoch_seconds(json!(1_700_000_000), 1_700_000_000)]
    #[case::epoch_millis(json!(1_700_000_000_000_i64), 1_700_000_000)]
    #[case::seconds_as_string(json!("1700000000"), 1_700_000_000)]
    #[case::millis_as_string(json!("1700000000000"), 1_700_000_000)]
    #[case::iso_utc(json!("2023-11-14T22:13:20Z"), 1_700_000_000)]
    #[case::iso_offset(json!("2023-11-14T22:13:20+00:00"), 1_700_000_000)]
    #[case::iso_naive(json!("2023-11-14T22:13:20"), 1_700_000_000)]
    #[case::iso_fractional(json!("2023-11-14T22:13:20.500Z"), 1_700_000_000)]
    #[case::float_seconds(json!(1_700_000_000.9), 1_700_000_000)]
    #[case::unparsable(json!("banana"), 0)]
    #[case::null(json!(null), 0)]
    #[case::empty_string(json!(""), 0)]
    #[case::negative(json!(-86_400), 0)]
    #[case::pre_epoch_iso(json!("1969-12-31T00:00:00Z"), 0)]
    #[case::object(json!({"seconds": 1_700_000_000}), 0)]
    #[case::array(json!([1_700_000_000]), 0)]
    fn coerces_any_shape(#[case] raw: Value, #[case] expected: i64) {
        assert_eq!(to_epoch_seconds(&raw), expected);
    }

    #[test]
    fn boundary_stays_in_seconds() {
        // Exactly at the cutoff is still treated as seconds.
        assert_eq!(to_epoch_seconds(&json!(MILLIS_CUTOFF)), MILLIS_CUTOFF);
        assert_eq!(
            to_epoch_seconds(&json!(MILLIS_CUTOFF + 1)),
            (MILLIS_CUTOFF + 1) / 1000
        );
    }

    #[test]
    fn overlong_digit_string_degrades_to_zero() {
        assert_eq!(to_epoch_seconds(&json!("99999999999999999999999")), 0);
    }
}
