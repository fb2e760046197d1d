//! Kind-tagged JSON rendering of values.
//!
//! Decimals, big-integers and temporals are rendered as strings so no
//! precision is lost to JSON numbers.

use crate::temporal;
use crate::value::Value;

/// Convert a runtime Value to JSON for diagnostics and fixtures.
pub fn value_to_json(v: &Value) -> serde_json::Value {
    match v {
        Value::Null => serde_json::json!({ "kind": "null" }),
        Value::Decimal(d) => serde_json::json!({ "kind": "decimal_value", "value": d.to_string() }),
        Value::BigInteger(b) => {
            serde_json::json!({ "kind": "big_integer_value", "value": b.to_string() })
        }
        Value::Byte(b) => serde_json::json!({ "kind": "byte_value", "value": b }),
        Value::Short(s) => serde_json::json!({ "kind": "short_value", "value": s }),
        Value::Int(i) => serde_json::json!({ "kind": "int_value", "value": i }),
        Value::Long(l) => serde_json::json!({ "kind": "long_value", "value": l }),
        // Non-finite floats have no JSON number; serde_json renders them as null.
        Value::Float(f) => serde_json::json!({ "kind": "float_value", "value": f }),
        Value::Double(d) => serde_json::json!({ "kind": "double_value", "value": d }),
        Value::Bool(b) => serde_json::json!({ "kind": "bool_value", "value": b }),
        Value::Char(c) => serde_json::json!({ "kind": "char_value", "value": c.to_string() }),
        Value::Text(t) => serde_json::json!({ "kind": "text_value", "value": t }),
        Value::Instant(i) => temporal_json("instant_value", temporal::format_instant(*i)),
        Value::Timestamp(ts) => serde_json::json!({
            "kind": "timestamp_value",
            "value": temporal::format_local_date_time(temporal::wall_clock(*ts)),
            "offset_seconds": ts.offset().whole_seconds(),
        }),
        Value::LocalDate(d) => temporal_json("local_date_value", temporal::format_local_date(*d)),
        Value::SqlDate(d) => temporal_json("sql_date_value", temporal::format_local_date(*d)),
        Value::LocalDateTime(dt) => temporal_json(
            "local_date_time_value",
            temporal::format_local_date_time(*dt),
        ),
        Value::LocalTime(t) => temporal_json("local_time_value", temporal::format_local_time(*t)),
        Value::SqlTime(t) => temporal_json("sql_time_value", temporal::format_local_time(*t)),
    }
}

fn temporal_json(kind: &str, rendered: Option<String>) -> serde_json::Value {
    serde_json::json!({ "kind": kind, "value": rendered })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use time::macros::{date, datetime};

    #[test]
    fn decimal_keeps_scale() {
        let v = Value::Decimal(Decimal::from_str("1.50").unwrap());
        assert_eq!(
            value_to_json(&v),
            serde_json::json!({ "kind": "decimal_value", "value": "1.50" })
        );
    }

    #[test]
    fn scalars() {
        assert_eq!(
            value_to_json(&Value::Int(7)),
            serde_json::json!({ "kind": "int_value", "value": 7 })
        );
        assert_eq!(
            value_to_json(&Value::Char('x')),
            serde_json::json!({ "kind": "char_value", "value": "x" })
        );
        assert_eq!(value_to_json(&Value::Null), serde_json::json!({ "kind": "null" }));
    }

    #[test]
    fn temporals_render_iso_text() {
        assert_eq!(
            value_to_json(&Value::Instant(datetime!(1976-07-04 12:00 UTC))),
            serde_json::json!({ "kind": "instant_value", "value": "1976-07-04T12:00:00Z" })
        );
        assert_eq!(
            value_to_json(&Value::SqlDate(date!(1976 - 07 - 04))),
            serde_json::json!({ "kind": "sql_date_value", "value": "1976-07-04" })
        );
        assert_eq!(
            value_to_json(&Value::Timestamp(datetime!(1976-07-04 08:00 -4))),
            serde_json::json!({
                "kind": "timestamp_value",
                "value": "1976-07-04T08:00:00",
                "offset_seconds": -14_400,
            })
        );
    }
}
