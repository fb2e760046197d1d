//! rowcast core -- dynamic row values and the value coercion engine.
//!
//! A row cursor hands out [`Value`]s whose variant is only known at run time.
//! The `coerce_to_*` functions turn such a value into one concrete type by
//! walking an ordered rule table over the [`TypeMatch`] combinator, returning
//! `None` for NULL, for unsupported source types, and for failed conversions
//! alike. Everything here is pure and synchronous.

pub mod coerce;
#[cfg(feature = "json")]
pub mod json;
pub mod target;
mod temporal;
pub mod type_match;
pub mod value;

pub use coerce::{
    coerce_to_big_integer, coerce_to_boolean, coerce_to_byte, coerce_to_character,
    coerce_to_decimal, coerce_to_double, coerce_to_float, coerce_to_instant, coerce_to_integer,
    coerce_to_local_date, coerce_to_local_date_time, coerce_to_local_time, coerce_to_long,
    coerce_to_short, Coerce,
};
#[cfg(feature = "json")]
pub use json::value_to_json;
pub use target::{coerce, ParseTargetTypeError, TargetType};
pub use type_match::{Branch, TypeMatch};
pub use value::{Number, Value};

// Payload types of `Value`, re-exported so callers need not pin the versions.
pub use num_bigint::BigInt;
pub use rust_decimal::Decimal;
pub use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
