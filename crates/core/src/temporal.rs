//! Strict ISO-8601 text forms for the temporal targets.
//!
//! Parsing never consults the process locale or time zone. Instants accept
//! any RFC 3339 offset and are normalized to UTC.

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

pub(crate) fn parse_instant(text: &str) -> Result<OffsetDateTime, time::error::Parse> {
    OffsetDateTime::parse(text, &Rfc3339).map(|instant| instant.to_offset(UtcOffset::UTC))
}

pub(crate) fn parse_local_date(text: &str) -> Result<Date, time::error::Parse> {
    Date::parse(text, format_description!("[year]-[month]-[day]"))
}

/// Seconds and the fraction are optional, as in `1976-07-04T12:00`.
pub(crate) fn parse_local_date_time(text: &str) -> Result<PrimitiveDateTime, time::error::Parse> {
    PrimitiveDateTime::parse(
        text,
        format_description!(
            "[year]-[month]-[day]T[hour]:[minute][optional [:[second][optional [.[subsecond]]]]]"
        ),
    )
}

pub(crate) fn parse_local_time(text: &str) -> Result<Time, time::error::Parse> {
    Time::parse(
        text,
        format_description!("[hour]:[minute][optional [:[second][optional [.[subsecond]]]]]"),
    )
}

pub(crate) fn format_instant(instant: OffsetDateTime) -> Option<String> {
    instant.to_offset(UtcOffset::UTC).format(&Rfc3339).ok()
}

pub(crate) fn format_local_date(date: Date) -> Option<String> {
    date.format(format_description!("[year]-[month]-[day]")).ok()
}

pub(crate) fn format_local_date_time(dt: PrimitiveDateTime) -> Option<String> {
    dt.format(format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
    ))
    .ok()
    .map(|text| trim_zero_fraction(text, dt.nanosecond()))
}

pub(crate) fn format_local_time(t: Time) -> Option<String> {
    t.format(format_description!("[hour]:[minute]:[second].[subsecond]"))
        .ok()
        .map(|text| trim_zero_fraction(text, t.nanosecond()))
}

/// Epoch seconds, as a 32-bit driver integer carries them.
pub(crate) fn instant_from_epoch_seconds(seconds: i32) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp(i64::from(seconds)).ok()
}

/// Epoch milliseconds, as a 64-bit driver integer carries them.
pub(crate) fn instant_from_epoch_millis(millis: i64) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000).ok()
}

/// Wall-clock reading of a timestamp in the offset it carries.
pub(crate) fn wall_clock(ts: OffsetDateTime) -> PrimitiveDateTime {
    PrimitiveDateTime::new(ts.date(), ts.time())
}

// `[subsecond]` always renders at least one digit; a whole second prints bare.
fn trim_zero_fraction(text: String, nanosecond: u32) -> String {
    if nanosecond != 0 {
        return text;
    }
    match text.rsplit_once('.') {
        Some((whole, _)) => whole.to_string(),
        None => text,
    }
}
