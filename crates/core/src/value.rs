//! Dynamic row values and the numeric family view over them.

use num_bigint::{BigInt, Sign};
use num_traits::{ToPrimitive, Zero};
use rust_decimal::Decimal;
use std::fmt;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};

use crate::temporal;

// ──────────────────────────────────────────────
// Runtime values
// ──────────────────────────────────────────────

/// A column value as delivered by a row cursor.
///
/// The cursor decides the variant; the coercion engine only ever inspects it.
/// `Timestamp`, `SqlDate` and `SqlTime` are the driver-native temporal
/// representations: a timestamp keeps the offset it was read in, while
/// `Instant` is always normalized to UTC.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Decimal(Decimal),
    BigInteger(BigInt),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    Char(char),
    Text(String),
    Instant(OffsetDateTime),
    LocalDate(Date),
    LocalDateTime(PrimitiveDateTime),
    LocalTime(Time),
    Timestamp(OffsetDateTime),
    SqlDate(Date),
    SqlTime(Time),
}

impl Value {
    /// True for SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns a human-readable type name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Decimal(_) => "Decimal",
            Value::BigInteger(_) => "BigInteger",
            Value::Byte(_) => "Byte",
            Value::Short(_) => "Short",
            Value::Int(_) => "Int",
            Value::Long(_) => "Long",
            Value::Float(_) => "Float",
            Value::Double(_) => "Double",
            Value::Bool(_) => "Bool",
            Value::Char(_) => "Char",
            Value::Text(_) => "Text",
            Value::Instant(_) => "Instant",
            Value::LocalDate(_) => "LocalDate",
            Value::LocalDateTime(_) => "LocalDateTime",
            Value::LocalTime(_) => "LocalTime",
            Value::Timestamp(_) => "Timestamp",
            Value::SqlDate(_) => "SqlDate",
            Value::SqlTime(_) => "SqlTime",
        }
    }

    // ── Variant projections ──────────────────────────────────────────────
    //
    // Each projection answers "is this value a T?" and hands back the payload
    // when it is. They are the branch predicates of the coercion tables.

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_big_integer(&self) -> Option<&BigInt> {
        match self {
            Value::BigInteger(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_byte(&self) -> Option<i8> {
        match self {
            Value::Byte(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_short(&self) -> Option<i16> {
        match self {
            Value::Short(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            Value::Long(l) => Some(*l),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(t) => Some(t.as_str()),
            _ => None,
        }
    }

    pub fn as_instant(&self) -> Option<OffsetDateTime> {
        match self {
            Value::Instant(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_local_date(&self) -> Option<Date> {
        match self {
            Value::LocalDate(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_local_date_time(&self) -> Option<PrimitiveDateTime> {
        match self {
            Value::LocalDateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    pub fn as_local_time(&self) -> Option<Time> {
        match self {
            Value::LocalTime(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<OffsetDateTime> {
        match self {
            Value::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    pub fn as_sql_date(&self) -> Option<Date> {
        match self {
            Value::SqlDate(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_sql_time(&self) -> Option<Time> {
        match self {
            Value::SqlTime(t) => Some(*t),
            _ => None,
        }
    }

    /// Family projection: matches every numeric variant, whatever its width.
    pub fn as_number(&self) -> Option<Number<'_>> {
        match self {
            Value::Byte(b) => Some(Number::Byte(*b)),
            Value::Short(s) => Some(Number::Short(*s)),
            Value::Int(i) => Some(Number::Int(*i)),
            Value::Long(l) => Some(Number::Long(*l)),
            Value::Float(f) => Some(Number::Float(*f)),
            Value::Double(d) => Some(Number::Double(*d)),
            Value::Decimal(d) => Some(Number::Decimal(*d)),
            Value::BigInteger(b) => Some(Number::BigInteger(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Char(c) => write!(f, "{}", c),
            Value::Text(t) => f.write_str(t),
            Value::Instant(i) | Value::Timestamp(i) => {
                f.write_str(&temporal::format_instant(*i).ok_or(fmt::Error)?)
            }
            Value::LocalDate(d) | Value::SqlDate(d) => {
                f.write_str(&temporal::format_local_date(*d).ok_or(fmt::Error)?)
            }
            Value::LocalDateTime(dt) => {
                f.write_str(&temporal::format_local_date_time(*dt).ok_or(fmt::Error)?)
            }
            Value::LocalTime(t) | Value::SqlTime(t) => {
                f.write_str(&temporal::format_local_time(*t).ok_or(fmt::Error)?)
            }
            numeric => match numeric.as_number() {
                Some(n) => write!(f, "{}", n),
                None => f.write_str(numeric.type_name()),
            },
        }
    }
}

macro_rules! value_from {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$source> for Value {
                fn from(v: $source) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

value_from! {
    Decimal => Decimal,
    BigInt => BigInteger,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    bool => Bool,
    char => Char,
    String => Text,
    Date => LocalDate,
    PrimitiveDateTime => LocalDateTime,
    Time => LocalTime,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

// ──────────────────────────────────────────────
// Numeric family
// ──────────────────────────────────────────────

/// Borrowed view over any numeric [`Value`].
///
/// Narrowing follows the classic primitive conversion rules: integral sources
/// keep their low-order two's complement bits, floating sources saturate to
/// 32 or 64 bits first (NaN becomes 0), and byte/short narrowing goes through
/// the 32-bit result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number<'a> {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Decimal(Decimal),
    BigInteger(&'a BigInt),
}

impl Number<'_> {
    pub fn to_i64(&self) -> i64 {
        match *self {
            Number::Byte(b) => i64::from(b),
            Number::Short(s) => i64::from(s),
            Number::Int(i) => i64::from(i),
            Number::Long(l) => l,
            Number::Float(f) => f as i64,
            Number::Double(d) => d as i64,
            Number::Decimal(d) => decimal_low_bits(d),
            Number::BigInteger(b) => big_integer_low_bits(b),
        }
    }

    pub fn to_i32(&self) -> i32 {
        match *self {
            Number::Float(f) => f as i32,
            Number::Double(d) => d as i32,
            _ => self.to_i64() as i32,
        }
    }

    pub fn to_i16(&self) -> i16 {
        self.to_i32() as i16
    }

    pub fn to_i8(&self) -> i8 {
        self.to_i32() as i8
    }

    pub fn to_f64(&self) -> f64 {
        match *self {
            Number::Byte(b) => f64::from(b),
            Number::Short(s) => f64::from(s),
            Number::Int(i) => f64::from(i),
            Number::Long(l) => l as f64,
            Number::Float(f) => f64::from(f),
            Number::Double(d) => d,
            Number::Decimal(d) => d.to_f64().unwrap_or(f64::NAN),
            Number::BigInteger(b) => b.to_f64().unwrap_or_else(|| signed_infinity(b)),
        }
    }

    pub fn to_f32(&self) -> f32 {
        match *self {
            Number::Byte(b) => f32::from(b),
            Number::Short(s) => f32::from(s),
            Number::Int(i) => i as f32,
            Number::Long(l) => l as f32,
            Number::Float(f) => f,
            Number::Double(d) => d as f32,
            Number::Decimal(d) => d.to_f32().unwrap_or(f32::NAN),
            Number::BigInteger(b) => b
                .to_f32()
                .unwrap_or_else(|| signed_infinity(b) as f32),
        }
    }

    pub fn is_zero(&self) -> bool {
        match *self {
            Number::Byte(b) => b == 0,
            Number::Short(s) => s == 0,
            Number::Int(i) => i == 0,
            Number::Long(l) => l == 0,
            Number::Float(f) => f == 0.0,
            Number::Double(d) => d == 0.0,
            Number::Decimal(d) => d.is_zero(),
            Number::BigInteger(b) => b.is_zero(),
        }
    }
}

/// Canonical text form, used when a number is re-read as a decimal.
impl fmt::Display for Number<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Byte(b) => write!(f, "{}", b),
            Number::Short(s) => write!(f, "{}", s),
            Number::Int(i) => write!(f, "{}", i),
            Number::Long(l) => write!(f, "{}", l),
            Number::Float(v) => write!(f, "{}", v),
            Number::Double(v) => write!(f, "{}", v),
            Number::Decimal(d) => write!(f, "{}", d),
            Number::BigInteger(b) => write!(f, "{}", b),
        }
    }
}

/// Truncates toward zero, then keeps the low 64 bits of the integral part.
fn decimal_low_bits(d: Decimal) -> i64 {
    let mut whole = d.trunc();
    whole.rescale(0);
    whole.mantissa() as i64
}

/// Low 64 bits of the two's complement representation.
fn big_integer_low_bits(b: &BigInt) -> i64 {
    let low = b.iter_u64_digits().next().unwrap_or(0) as i64;
    if b.sign() == Sign::Minus {
        low.wrapping_neg()
    } else {
        low
    }
}

fn signed_infinity(b: &BigInt) -> f64 {
    if b.sign() == Sign::Minus {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
