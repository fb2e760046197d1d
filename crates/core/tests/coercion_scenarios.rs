//! End-to-end coercion scenarios through the public API.
//!
//! Organized by concern:
//!   A. Identity and NULL
//!   B. Rule precedence
//!   C. Text parsing
//!   D. Temporal conversions

use rowcast_core::{
    coerce, coerce_to_big_integer, coerce_to_boolean, coerce_to_character, coerce_to_decimal,
    coerce_to_double, coerce_to_instant, coerce_to_integer, coerce_to_local_date,
    coerce_to_local_date_time, coerce_to_local_time, coerce_to_long, coerce_to_short, BigInt,
    Coerce, Decimal, TargetType, Value,
};
use std::str::FromStr;
use time::macros::{date, datetime, time};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

/// One sample value per variant, each paired with the target it is native to.
fn native_samples() -> Vec<(Value, TargetType)> {
    vec![
        (Value::Decimal(dec("-12.500")), TargetType::Decimal),
        (
            Value::BigInteger(BigInt::from_str("98765432109876543210987654321").unwrap()),
            TargetType::BigInteger,
        ),
        (Value::Bool(false), TargetType::Boolean),
        (Value::Byte(-7), TargetType::Byte),
        (Value::Short(1234), TargetType::Short),
        (Value::Int(-99_999), TargetType::Integer),
        (Value::Long(1 << 50), TargetType::Long),
        (Value::Float(0.75), TargetType::Float),
        (Value::Double(-1e-9), TargetType::Double),
        (Value::Char('Q'), TargetType::Character),
        (
            Value::Instant(datetime!(2001-02-03 04:05:06 UTC)),
            TargetType::Instant,
        ),
        (Value::LocalDate(date!(2001 - 02 - 03)), TargetType::LocalDate),
        (
            Value::LocalDateTime(datetime!(2001-02-03 04:05:06)),
            TargetType::LocalDateTime,
        ),
        (Value::LocalTime(time!(04:05:06)), TargetType::LocalTime),
    ]
}

// ──────────────────────────────────────────────
// A. Identity and NULL
// ──────────────────────────────────────────────

#[test]
fn a1_native_values_come_back_unchanged() {
    for (value, target) in native_samples() {
        assert_eq!(
            coerce(&value, target),
            Some(value.clone()),
            "identity failed for {}",
            target
        );
    }
}

#[test]
fn a2_null_is_absent_everywhere() {
    for target in TargetType::ALL {
        assert_eq!(coerce(&Value::Null, target), None, "{}", target);
    }
}

// ──────────────────────────────────────────────
// B. Rule precedence
// ──────────────────────────────────────────────

#[test]
fn b1_big_integer_to_decimal_is_exact_not_textual() {
    let big = BigInt::from_str("79228162514264337593543950335").unwrap();
    assert_eq!(
        coerce_to_decimal(&Value::BigInteger(big)),
        Some(Decimal::MAX)
    );
}

#[test]
fn b2_non_digit_character_does_not_fall_through() {
    assert_eq!(coerce_to_integer(&Value::Char('x')), None);
    assert_eq!(coerce_to_integer(&Value::Char('4')), Some(4));
    // the same text is parsed by the text rule
    assert_eq!(coerce_to_integer(&text("4")), Some(4));
}

#[test]
fn b3_narrowing_matches_truncating_cast() {
    assert_eq!(coerce_to_short(&Value::Long(40_000)), Some(-25_536));
    assert_eq!(coerce_to_short(&Value::Decimal(dec("40000.9"))), Some(-25_536));
    let big = BigInt::from(40_000);
    assert_eq!(coerce_to_short(&Value::BigInteger(big)), Some(-25_536));
}

#[test]
fn b4_boolean_prefers_numeric_over_text_shape() {
    // Decimal is numeric, so "0.0" as a number is false while the text is unparseable.
    assert_eq!(coerce_to_boolean(&Value::Decimal(dec("0.0"))), Some(false));
    assert_eq!(coerce_to_boolean(&text("0.0")), None);
}

// ──────────────────────────────────────────────
// C. Text parsing
// ──────────────────────────────────────────────

#[test]
fn c1_decimal_text() {
    assert_eq!(
        coerce_to_decimal(&text("12345.12345")),
        Some(dec("12345.12345"))
    );
    assert_eq!(coerce_to_decimal(&text("0hello")), None);
}

#[test]
fn c2_boolean_text() {
    assert_eq!(coerce_to_boolean(&text("TRUE")), Some(true));
    assert_eq!(coerce_to_boolean(&text("yes")), Some(true));
    assert_eq!(coerce_to_boolean(&text("on")), Some(true));
    assert_eq!(coerce_to_boolean(&text("")), Some(false));
    assert_eq!(coerce_to_boolean(&text("maybe")), None);
}

#[test]
fn c3_character_text() {
    assert_eq!(coerce_to_character(&text("r")), Some('r'));
    assert_eq!(coerce_to_character(&text("blah")), None);
}

#[test]
fn c4_numeric_text_is_locale_independent() {
    assert_eq!(coerce_to_double(&text("1234.5")), Some(1234.5));
    assert_eq!(coerce_to_double(&text("1234,5")), None);
    assert_eq!(coerce_to_long(&text("1,234")), None);
    assert_eq!(
        coerce_to_big_integer(&text("-1000000000000000000000")),
        Some(BigInt::from_str("-1000000000000000000000").unwrap())
    );
}

// ──────────────────────────────────────────────
// D. Temporal conversions
// ──────────────────────────────────────────────

#[test]
fn d1_instant_from_epoch_seconds_and_millis() {
    let independence_day = datetime!(1976-07-04 12:00:00 UTC);
    assert_eq!(
        coerce_to_instant(&Value::Int(205_329_600)),
        Some(independence_day)
    );
    assert_eq!(
        coerce_to_instant(&Value::Long(205_329_600_000)),
        Some(independence_day)
    );
}

#[test]
fn d2_local_date_time_text() {
    assert_eq!(
        coerce_to_local_date_time(&text("1976-07-04T12:00:00")),
        Some(datetime!(1976-07-04 12:00))
    );
    assert_eq!(coerce_to_local_date_time(&text("hello world")), None);
}

#[test]
fn d3_timestamp_feeds_every_temporal_target() {
    let ts = Value::Timestamp(datetime!(1976-07-04 21:15:30 -3));
    assert_eq!(
        coerce_to_instant(&ts),
        Some(datetime!(1976-07-05 00:15:30 UTC))
    );
    assert_eq!(coerce_to_local_date(&ts), Some(date!(1976 - 07 - 04)));
    assert_eq!(
        coerce_to_local_date_time(&ts),
        Some(datetime!(1976-07-04 21:15:30))
    );
    assert_eq!(coerce_to_local_time(&ts), Some(time!(21:15:30)));
}

#[test]
fn d4_every_temporal_target_parses_text() {
    assert!(coerce_to_instant(&text("2020-02-29T23:59:59.5Z")).is_some());
    assert_eq!(
        coerce_to_local_date(&text("2020-02-29")),
        Some(date!(2020 - 02 - 29))
    );
    assert_eq!(
        coerce_to_local_time(&text("23:59:59.5")),
        Some(time!(23:59:59.5))
    );
}

#[test]
fn d5_generic_get_through_coerce_trait() {
    fn get<T: Coerce>(v: &Value) -> Option<T> {
        T::coerce(v)
    }
    let v = text("1976-07-04");
    assert_eq!(get::<time::Date>(&v), Some(date!(1976 - 07 - 04)));
    assert_eq!(get::<i64>(&v), None);
}
