//! Value coercion rule tables.
//!
//! Every `coerce_to_*` function walks an ordered table of source-type rules
//! over [`TypeMatch`]. The first rule whose source type matches decides the
//! outcome, including when its transform fails: a non-digit character offered
//! to a numeric target is absent, it does not fall through to the text rule.
//!
//! There is one failure channel. NULL input, an unsupported source type and a
//! failed parse or conversion all come back as `None`.

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt::Display;
use std::str::FromStr;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};
use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};

use crate::target::TargetType;
use crate::temporal;
use crate::type_match::TypeMatch;
use crate::value::Value;

// ──────────────────────────────────────────────
// Session entry
// ──────────────────────────────────────────────

/// NULL settles the session before any rule is consulted.
fn rules<T>(value: &Value) -> TypeMatch<'_, Value, Option<T>> {
    if value.is_null() {
        TypeMatch::settled(value, None)
    } else {
        TypeMatch::on(value)
    }
}

// ──────────────────────────────────────────────
// Arbitrary precision
// ──────────────────────────────────────────────

/// Exact in every rule. A decimal holds a 96-bit mantissa with at most 28
/// fractional digits, so a source that needs more (`Double(1e29)`, the text
/// `"1e40"`, a 30-digit fraction) is absent rather than rounded.
pub fn coerce_to_decimal(value: &Value) -> Option<Decimal> {
    rules(value)
        .branch(Value::as_decimal)
        .then_map(Some)
        .branch(Value::as_big_integer)
        .then_map(decimal_from_big_integer)
        .branch(Value::as_byte)
        .then_map(|b| Some(Decimal::from(i64::from(b))))
        .branch(Value::as_short)
        .then_map(|s| Some(Decimal::from(i64::from(s))))
        .branch(Value::as_int)
        .then_map(|i| Some(Decimal::from(i64::from(i))))
        .branch(Value::as_long)
        .then_map(|l| Some(Decimal::from(l)))
        // Re-read the printed form so the source keeps its own precision.
        .branch(Value::as_number)
        .then_map(|n| parse_decimal(&n.to_string()))
        .branch(Value::as_bool)
        .then_map(|b| Some(if b { Decimal::ONE } else { Decimal::ZERO }))
        .branch(Value::as_char)
        .then_map(|c| digit(TargetType::Decimal, c).map(Decimal::from))
        .branch(Value::as_text)
        .then_map(parse_decimal)
        .or_none()
}

pub fn coerce_to_big_integer(value: &Value) -> Option<BigInt> {
    rules(value)
        .branch(Value::as_big_integer)
        .then_map(|b| Some(b.clone()))
        .branch(Value::as_decimal)
        .then_map(big_integer_from_decimal)
        .branch(Value::as_number)
        .then_map(|n| Some(BigInt::from(n.to_i64())))
        .branch(Value::as_bool)
        .then_map(|b| Some(BigInt::from(u8::from(b))))
        .branch(Value::as_char)
        .then_map(|c| digit(TargetType::BigInteger, c).map(BigInt::from))
        .branch(Value::as_text)
        .then_map(parse_big_integer)
        .or_none()
}

// ──────────────────────────────────────────────
// Boolean and character
// ──────────────────────────────────────────────

pub fn coerce_to_boolean(value: &Value) -> Option<bool> {
    rules(value)
        .branch(Value::as_bool)
        .then_map(Some)
        .branch(Value::as_number)
        .then_map(|n| Some(!n.is_zero()))
        .branch(Value::as_char)
        .then_map(boolean_from_char)
        .branch(Value::as_text)
        .then_map(boolean_from_text)
        .or_none()
}

pub fn coerce_to_character(value: &Value) -> Option<char> {
    rules(value)
        .branch(Value::as_char)
        .then_map(Some)
        .branch(Value::as_text)
        .then_map(single_char)
        .branch(Value::as_bool)
        .then_map(|b| Some(if b { 't' } else { 'f' }))
        .or_none()
}

// ──────────────────────────────────────────────
// Bounded numerics
// ──────────────────────────────────────────────

pub fn coerce_to_byte(value: &Value) -> Option<i8> {
    rules(value)
        .branch(Value::as_byte)
        .then_map(Some)
        .branch(Value::as_number)
        .then_map(|n| Some(n.to_i8()))
        .branch(Value::as_bool)
        .then_map(|b| Some(i8::from(b)))
        .branch(Value::as_char)
        .then_map(|c| digit(TargetType::Byte, c).and_then(|d| i8::try_from(d).ok()))
        .branch(Value::as_text)
        .then_map(|t| parse_text(TargetType::Byte, t))
        .or_none()
}

pub fn coerce_to_short(value: &Value) -> Option<i16> {
    rules(value)
        .branch(Value::as_short)
        .then_map(Some)
        .branch(Value::as_number)
        .then_map(|n| Some(n.to_i16()))
        .branch(Value::as_bool)
        .then_map(|b| Some(i16::from(b)))
        .branch(Value::as_char)
        .then_map(|c| digit(TargetType::Short, c).map(i16::from))
        .branch(Value::as_text)
        .then_map(|t| parse_text(TargetType::Short, t))
        .or_none()
}

pub fn coerce_to_integer(value: &Value) -> Option<i32> {
    rules(value)
        .branch(Value::as_int)
        .then_map(Some)
        .branch(Value::as_number)
        .then_map(|n| Some(n.to_i32()))
        .branch(Value::as_bool)
        .then_map(|b| Some(i32::from(b)))
        .branch(Value::as_char)
        .then_map(|c| digit(TargetType::Integer, c).map(i32::from))
        .branch(Value::as_text)
        .then_map(|t| parse_text(TargetType::Integer, t))
        .or_none()
}

pub fn coerce_to_long(value: &Value) -> Option<i64> {
    rules(value)
        .branch(Value::as_long)
        .then_map(Some)
        .branch(Value::as_number)
        .then_map(|n| Some(n.to_i64()))
        .branch(Value::as_bool)
        .then_map(|b| Some(i64::from(b)))
        .branch(Value::as_char)
        .then_map(|c| digit(TargetType::Long, c).map(i64::from))
        .branch(Value::as_text)
        .then_map(|t| parse_text(TargetType::Long, t))
        .or_none()
}

pub fn coerce_to_float(value: &Value) -> Option<f32> {
    rules(value)
        .branch(Value::as_float)
        .then_map(Some)
        .branch(Value::as_number)
        .then_map(|n| Some(n.to_f32()))
        .branch(Value::as_bool)
        .then_map(|b| Some(if b { 1.0 } else { 0.0 }))
        .branch(Value::as_char)
        .then_map(|c| digit(TargetType::Float, c).map(f32::from))
        .branch(Value::as_text)
        .then_map(|t| parse_floating(TargetType::Float, t))
        .or_none()
}

pub fn coerce_to_double(value: &Value) -> Option<f64> {
    rules(value)
        .branch(Value::as_double)
        .then_map(Some)
        .branch(Value::as_number)
        .then_map(|n| Some(n.to_f64()))
        .branch(Value::as_bool)
        .then_map(|b| Some(if b { 1.0 } else { 0.0 }))
        .branch(Value::as_char)
        .then_map(|c| digit(TargetType::Double, c).map(f64::from))
        .branch(Value::as_text)
        .then_map(|t| parse_floating(TargetType::Double, t))
        .or_none()
}

// ──────────────────────────────────────────────
// Temporal
// ──────────────────────────────────────────────

/// Driver integers are epoch seconds when 32-bit and epoch milliseconds when
/// 64-bit.
pub fn coerce_to_instant(value: &Value) -> Option<OffsetDateTime> {
    rules(value)
        .branch(Value::as_instant)
        .then_map(Some)
        .branch(Value::as_timestamp)
        .then_map(|ts| Some(ts.to_offset(UtcOffset::UTC)))
        .branch(Value::as_int)
        .then_map(|secs| {
            out_of_range(
                TargetType::Instant,
                temporal::instant_from_epoch_seconds(secs),
            )
        })
        .branch(Value::as_long)
        .then_map(|millis| {
            out_of_range(
                TargetType::Instant,
                temporal::instant_from_epoch_millis(millis),
            )
        })
        .branch(Value::as_text)
        .then_map(|t| parse_temporal(TargetType::Instant, t, temporal::parse_instant))
        .or_none()
}

pub fn coerce_to_local_date(value: &Value) -> Option<Date> {
    rules(value)
        .branch(Value::as_local_date)
        .then_map(Some)
        .branch(Value::as_sql_date)
        .then_map(Some)
        .branch(Value::as_timestamp)
        .then_map(|ts| Some(ts.date()))
        .branch(Value::as_text)
        .then_map(|t| parse_temporal(TargetType::LocalDate, t, temporal::parse_local_date))
        .or_none()
}

pub fn coerce_to_local_date_time(value: &Value) -> Option<PrimitiveDateTime> {
    rules(value)
        .branch(Value::as_local_date_time)
        .then_map(Some)
        .branch(Value::as_timestamp)
        .then_map(|ts| Some(temporal::wall_clock(ts)))
        .branch(Value::as_sql_date)
        .then_map(|d| Some(d.midnight()))
        .branch(Value::as_text)
        .then_map(|t| {
            parse_temporal(TargetType::LocalDateTime, t, temporal::parse_local_date_time)
        })
        .or_none()
}

pub fn coerce_to_local_time(value: &Value) -> Option<Time> {
    rules(value)
        .branch(Value::as_local_time)
        .then_map(Some)
        .branch(Value::as_sql_time)
        .then_map(Some)
        .branch(Value::as_timestamp)
        .then_map(|ts| Some(ts.time()))
        .branch(Value::as_text)
        .then_map(|t| parse_temporal(TargetType::LocalTime, t, temporal::parse_local_time))
        .or_none()
}

// ──────────────────────────────────────────────
// Shared helpers
// ──────────────────────────────────────────────

fn digit(target: TargetType, c: char) -> Option<u8> {
    let d = decimal_digit(c);
    if d.is_none() {
        tracing::trace!(coerce_to = %target, character = %c, "character is not a digit");
    }
    d
}

/// Value of a Unicode decimal digit (general category `Nd`), any script.
///
/// `Nd` characters come in contiguous runs of ten ordered zero to nine, so
/// the value is the distance from the start of the run. Runs can abut
/// (the mathematical digit styles), hence the modulo.
pub(crate) fn decimal_digit(c: char) -> Option<u8> {
    if !is_decimal_digit(c) {
        return None;
    }
    let code = u32::from(c);
    let preceding = (1..=code)
        .map_while(|back| char::from_u32(code - back))
        .take_while(|&p| is_decimal_digit(p))
        .count();
    u8::try_from(preceding % 10).ok()
}

fn is_decimal_digit(c: char) -> bool {
    c.general_category() == GeneralCategory::DecimalNumber
}

/// `t`/`y` and nonzero digits are true, `f`/`n` and zero digits are false.
pub(crate) fn boolean_from_char(c: char) -> Option<bool> {
    match c {
        't' | 'y' => Some(true),
        'f' | 'n' => Some(false),
        other => decimal_digit(other).map(|d| d != 0),
    }
}

/// Case-insensitive word forms; the empty string reads as false.
pub(crate) fn boolean_from_text(text: &str) -> Option<bool> {
    let lowered = text.to_lowercase();
    match lowered.as_str() {
        "" => Some(false),
        "true" | "yes" | "on" => Some(true),
        "false" | "no" | "off" => Some(false),
        other => single_char(other).and_then(boolean_from_char),
    }
}

fn single_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn parse_text<T>(target: TargetType, text: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    match text.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::trace!(coerce_to = %target, text, error = %e, "text did not parse");
            None
        }
    }
}

/// `[+-]digits`, nothing else. The crate parser also skips `_` separators.
fn parse_big_integer(text: &str) -> Option<BigInt> {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if !is_ascii_digits(digits) || digits.is_empty() {
        tracing::trace!(coerce_to = %TargetType::BigInteger, text, "malformed integer text");
        return None;
    }
    parse_text(TargetType::BigInteger, text)
}

/// Plain or scientific notation, read exactly. Text that would have to be
/// rounded to fit a decimal is absent.
fn parse_decimal(text: &str) -> Option<Decimal> {
    let Some(plain) = NumericText::split(text).and_then(|parts| parts.to_plain()) else {
        tracing::trace!(coerce_to = %TargetType::Decimal, text, "malformed or out of range decimal text");
        return None;
    };
    Decimal::from_str_exact(&plain)
        .map_err(|e| {
            tracing::trace!(coerce_to = %TargetType::Decimal, text, error = %e, "text did not parse");
        })
        .ok()
}

/// Decimal or scientific notation, or exactly `Infinity` / `NaN` after an
/// optional sign. Other float spellings (`inf`, `nan`, `infinity`) are absent.
fn parse_floating<T>(target: TargetType, text: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    let body = text.strip_prefix(['+', '-']).unwrap_or(text);
    if !matches!(body, "Infinity" | "NaN") && NumericText::split(text).is_none() {
        tracing::trace!(coerce_to = %target, text, "malformed floating-point text");
        return None;
    }
    parse_text(target, text)
}

fn is_ascii_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

/// Decimal exponent range that can still land inside a `Decimal`.
const MIN_POINT: i64 = -28;
const MAX_POINT: i64 = 29;

/// `[+-]whole[.fraction][(e|E)[+-]exponent]` with ASCII digits and at least
/// one mantissa digit.
#[derive(Debug, PartialEq, Eq)]
struct NumericText<'a> {
    negative: bool,
    whole: &'a str,
    fraction: &'a str,
    exponent: Option<&'a str>,
}

impl<'a> NumericText<'a> {
    fn split(text: &'a str) -> Option<Self> {
        let negative = text.starts_with('-');
        let rest = text.strip_prefix(['+', '-']).unwrap_or(text);
        let (mantissa, exponent) = match rest.split_once(['e', 'E']) {
            Some((mantissa, exponent)) => {
                let digits = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
                if digits.is_empty() || !is_ascii_digits(digits) {
                    return None;
                }
                (mantissa, Some(exponent))
            }
            None => (rest, None),
        };
        let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if (whole.is_empty() && fraction.is_empty())
            || !is_ascii_digits(whole)
            || !is_ascii_digits(fraction)
        {
            return None;
        }
        Some(Self {
            negative,
            whole,
            fraction,
            exponent,
        })
    }

    /// Plain notation `from_str_exact` accepts, with the exponent folded in.
    /// `None` when the exponent puts the value outside the decimal range.
    fn to_plain(&self) -> Option<String> {
        let sign = if self.negative { "-" } else { "" };
        let Some(exponent) = self.exponent else {
            let whole = self.whole.trim_start_matches('0');
            let whole = if whole.is_empty() { "0" } else { whole };
            return Some(if self.fraction.is_empty() {
                format!("{}{}", sign, whole)
            } else {
                format!("{}{}.{}", sign, whole, self.fraction)
            });
        };

        let exponent: i32 = exponent.parse().ok()?;
        let digits = format!("{}{}", self.whole, self.fraction);
        let significant = digits.trim_matches('0');
        if significant.is_empty() {
            return Some("0".to_string());
        }
        let leading = digits.len() - digits.trim_start_matches('0').len();
        // Position of the decimal point relative to the first significant digit.
        let point = i64::try_from(self.whole.len()).ok()? - i64::try_from(leading).ok()?
            + i64::from(exponent);
        if !(MIN_POINT..=MAX_POINT).contains(&point) {
            return None;
        }
        Some(match usize::try_from(point) {
            Err(_) | Ok(0) => format!(
                "{}0.{}{}",
                sign,
                "0".repeat(usize::try_from(-point).unwrap_or(0)),
                significant
            ),
            Ok(point) if point >= significant.len() => format!(
                "{}{}{}",
                sign,
                significant,
                "0".repeat(point - significant.len())
            ),
            Ok(point) => format!("{}{}.{}", sign, &significant[..point], &significant[point..]),
        })
    }
}

fn parse_temporal<T>(
    target: TargetType,
    text: &str,
    parse: fn(&str) -> Result<T, time::error::Parse>,
) -> Option<T> {
    match parse(text) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::trace!(coerce_to = %target, text, error = %e, "text did not parse");
            None
        }
    }
}

fn out_of_range<T>(target: TargetType, converted: Option<T>) -> Option<T> {
    if converted.is_none() {
        tracing::trace!(coerce_to = %target, "source value out of range");
    }
    converted
}

/// Exact; big-integers wider than the decimal mantissa are absent.
fn decimal_from_big_integer(b: &BigInt) -> Option<Decimal> {
    let converted = b
        .to_i128()
        .and_then(|n| Decimal::try_from_i128_with_scale(n, 0).ok());
    out_of_range(TargetType::Decimal, converted)
}

/// Truncates toward zero.
fn big_integer_from_decimal(d: Decimal) -> Option<BigInt> {
    let mut whole = d.trunc();
    whole.rescale(0);
    Some(BigInt::from(whole.mantissa()))
}

// ──────────────────────────────────────────────
// Generic entry
// ──────────────────────────────────────────────

/// A type that values can be coerced into.
pub trait Coerce: Sized {
    const TARGET: TargetType;

    fn coerce(value: &Value) -> Option<Self>;
}

macro_rules! coerce_impl {
    ($($ty:ty => $target:ident, $func:ident;)*) => {
        $(
            impl Coerce for $ty {
                const TARGET: TargetType = TargetType::$target;

                fn coerce(value: &Value) -> Option<Self> {
                    $func(value)
                }
            }
        )*
    };
}

coerce_impl! {
    Decimal => Decimal, coerce_to_decimal;
    BigInt => BigInteger, coerce_to_big_integer;
    bool => Boolean, coerce_to_boolean;
    i8 => Byte, coerce_to_byte;
    i16 => Short, coerce_to_short;
    i32 => Integer, coerce_to_integer;
    i64 => Long, coerce_to_long;
    f32 => Float, coerce_to_float;
    f64 => Double, coerce_to_double;
    char => Character, coerce_to_character;
    OffsetDateTime => Instant, coerce_to_instant;
    Date => LocalDate, coerce_to_local_date;
    PrimitiveDateTime => LocalDateTime, coerce_to_local_date_time;
    Time => LocalTime, coerce_to_local_time;
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
