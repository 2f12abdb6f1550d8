//! Reusable field validators
//!
//! Each validator reads one loosely typed JSON value and returns the typed
//! value it holds, or a [`ValidationError`] naming the offending field.

use crate::core::entity::UnknownStatus;
use crate::core::error::ValidationError;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use regex::Regex;
use serde_json::Value;
use std::str::FromStr;
use std::sync::OnceLock;

/// Wire format of dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validator: value is a string
pub fn string(field: &str, value: &Value) -> Result<String, ValidationError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ValidationError::shape(field, format!("{} is not of type 'string'", value)))
}

/// Validator: value is a string with at least one non-whitespace character
pub fn non_empty_string(field: &str, value: &Value) -> Result<String, ValidationError> {
    let s = string(field, value)?;
    if s.trim().is_empty() {
        return Err(ValidationError::shape(field, "must not be empty"));
    }
    Ok(s)
}

/// Validator: value is an integer
pub fn integer(field: &str, value: &Value) -> Result<i64, ValidationError> {
    value
        .as_i64()
        .ok_or_else(|| ValidationError::shape(field, format!("{} is not of type 'integer'", value)))
}

/// Validator: value is an integer strictly greater than zero
pub fn positive_integer(field: &str, value: &Value) -> Result<i64, ValidationError> {
    let n = integer(field, value)?;
    if n <= 0 {
        return Err(ValidationError::shape(
            field,
            format!("{} is less than the minimum of 1", n),
        ));
    }
    Ok(n)
}

/// Validator: value is a boolean
pub fn boolean(field: &str, value: &Value) -> Result<bool, ValidationError> {
    value
        .as_bool()
        .ok_or_else(|| ValidationError::shape(field, format!("{} is not of type 'boolean'", value)))
}

/// Validator: value is one of the members of a status enum
pub fn status<T>(field: &str, value: &Value) -> Result<T, ValidationError>
where
    T: FromStr<Err = UnknownStatus>,
{
    let s = string(field, value)?;
    s.parse::<T>()
        .map_err(|e| ValidationError::shape(field, e.to_string()))
}

/// Validator: value is a `YYYY-MM-DD` date string
///
/// The result is midnight UTC of that day.
pub fn date(value: &Value) -> Result<DateTime<Utc>, ValidationError> {
    match value.as_str() {
        Some(s) => parse_date(s),
        None => Err(ValidationError::InvalidDateFormat {
            value: value.to_string(),
        }),
    }
}

/// Parse a strict `YYYY-MM-DD` date into midnight UTC
pub fn parse_date(s: &str) -> Result<DateTime<Utc>, ValidationError> {
    static DATE_REGEX: OnceLock<Regex> = OnceLock::new();
    // chrono alone accepts signed, unpadded and over-long years
    let regex = DATE_REGEX.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

    let invalid = || ValidationError::InvalidDateFormat {
        value: s.to_string(),
    };
    if !regex.is_match(s) {
        return Err(invalid());
    }
    let day = NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| invalid())?;
    Ok(day.and_time(NaiveTime::MIN).and_utc())
}

/// Format a timestamp as a `YYYY-MM-DD` date string
pub fn format_date(ts: &DateTime<Utc>) -> String {
    ts.format(DATE_FORMAT).to_string()
}
