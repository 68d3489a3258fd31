//! Primitive field rules shared by the schema validator and domain checks

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
use regex::Regex;
use serde_json::Value;

static ZIP_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{5}$").unwrap_or_else(|e| panic!("zip code pattern must compile: {e}"))
});

const OFFSET_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Latitude bounds, inclusive
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
/// Longitude bounds, inclusive
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// ISO-8601 date or date-time, with or without an offset. `Z` is read as
/// `+00:00`. A seconds field of 60 is rejected.
#[must_use]
pub fn is_iso8601_datetime(value: &str) -> bool {
    let normalized = value.replace('Z', "+00:00");
    let s = normalized.as_str();

    let with_offset = DateTime::parse_from_rfc3339(s).ok().or_else(|| {
        OFFSET_FORMATS
            .iter()
            .find_map(|f| DateTime::parse_from_str(s, f).ok())
    });
    if let Some(datetime) = with_offset {
        return !is_leap_second(&datetime);
    }

    if let Some(datetime) = NAIVE_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
    {
        return !is_leap_second(&datetime);
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

// chrono carries a leap second as a nanosecond count past one second
fn is_leap_second<T: Timelike>(time: &T) -> bool {
    time.nanosecond() >= 1_000_000_000
}

/// Exactly five digits once surrounding whitespace is removed
#[must_use]
pub fn is_zip_code(value: &str) -> bool {
    ZIP_CODE.is_match(value.trim())
}

#[must_use]
pub fn in_range(value: f64, (min, max): (f64, f64)) -> bool {
    (min..=max).contains(&value)
}

/// A string that differs from its trimmed form
#[must_use]
pub fn has_edge_whitespace(value: &str) -> bool {
    value != value.trim()
}

/// Equality used for `enum` membership: numbers compare by value, so `1`
/// matches `1.0`.
#[must_use]
pub fn json_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}
