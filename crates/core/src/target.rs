//! Coercion targets named at runtime.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::coerce::*;
use crate::value::Value;

/// The fourteen types a value can be coerced into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    Decimal,
    BigInteger,
    Boolean,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    Character,
    Instant,
    LocalDate,
    LocalDateTime,
    LocalTime,
}

impl TargetType {
    pub const ALL: [TargetType; 14] = [
        TargetType::Decimal,
        TargetType::BigInteger,
        TargetType::Boolean,
        TargetType::Byte,
        TargetType::Short,
        TargetType::Integer,
        TargetType::Long,
        TargetType::Float,
        TargetType::Double,
        TargetType::Character,
        TargetType::Instant,
        TargetType::LocalDate,
        TargetType::LocalDateTime,
        TargetType::LocalTime,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TargetType::Decimal => "decimal",
            TargetType::BigInteger => "big_integer",
            TargetType::Boolean => "boolean",
            TargetType::Byte => "byte",
            TargetType::Short => "short",
            TargetType::Integer => "integer",
            TargetType::Long => "long",
            TargetType::Float => "float",
            TargetType::Double => "double",
            TargetType::Character => "character",
            TargetType::Instant => "instant",
            TargetType::LocalDate => "local_date",
            TargetType::LocalDateTime => "local_date_time",
            TargetType::LocalTime => "local_time",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a target name is not one of [`TargetType::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown coercion target: {name}")]
pub struct ParseTargetTypeError {
    pub name: String,
}

impl FromStr for TargetType {
    type Err = ParseTargetTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TargetType::ALL
            .into_iter()
            .find(|target| target.name() == s)
            .ok_or_else(|| ParseTargetTypeError {
                name: s.to_string(),
            })
    }
}

/// Coerce `value` to `target` and re-wrap the result in the matching variant.
pub fn coerce(value: &Value, target: TargetType) -> Option<Value> {
    match target {
        TargetType::Decimal => coerce_to_decimal(value).map(Value::Decimal),
        TargetType::BigInteger => coerce_to_big_integer(value).map(Value::BigInteger),
        TargetType::Boolean => coerce_to_boolean(value).map(Value::Bool),
        TargetType::Byte => coerce_to_byte(value).map(Value::Byte),
        TargetType::Short => coerce_to_short(value).map(Value::Short),
        TargetType::Integer => coerce_to_integer(value).map(Value::Int),
        TargetType::Long => coerce_to_long(value).map(Value::Long),
        TargetType::Float => coerce_to_float(value).map(Value::Float),
        TargetType::Double => coerce_to_double(value).map(Value::Double),
        TargetType::Character => coerce_to_character(value).map(Value::Char),
        TargetType::Instant => coerce_to_instant(value).map(Value::Instant),
        TargetType::LocalDate => coerce_to_local_date(value).map(Value::LocalDate),
        TargetType::LocalDateTime => coerce_to_local_date_time(value).map(Value::LocalDateTime),
        TargetType::LocalTime => coerce_to_local_time(value).map(Value::LocalTime),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for target in TargetType::ALL {
            assert_eq!(target.name().parse::<TargetType>(), Ok(target));
        }
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = "timestamp".parse::<TargetType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown coercion target: timestamp");
    }

    #[test]
    fn serde_uses_snake_case_names() {
        let json = serde_json::to_string(&TargetType::LocalDateTime).unwrap();
        assert_eq!(json, "\"local_date_time\"");
        let parsed: TargetType = serde_json::from_str("\"big_integer\"").unwrap();
        assert_eq!(parsed, TargetType::BigInteger);
    }

    #[test]
    fn dynamic_coerce_rewraps_variant() {
        let v = Value::Text("42".to_string());
        assert_eq!(coerce(&v, TargetType::Long), Some(Value::Long(42)));
        assert_eq!(coerce(&v, TargetType::Byte), Some(Value::Byte(42)));
        assert_eq!(coerce(&v, TargetType::Character), None);
        assert_eq!(coerce(&Value::Null, TargetType::Boolean), None);
    }
}
