//! Single-cell validators for tender CSV files
//!
//! Each validator takes the raw cell text and either returns the coerced
//! value or a [`ValidationError::InvalidValue`] naming the offending value and
//! the expected shape.

use crate::ValidationError;
use crate::constants::{FLOAT_EXAMPLE, PRODUCTS, UTC_TIMESTAMP_EXAMPLE, ZONES};
use chrono::{DateTime, SecondsFormat, Timelike, Utc};
use regex::Regex;
use std::sync::LazyLock;

/// Result of a single validator
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// 2^63; integral floats in `[-2^63, 2^63)` convert to `i64` exactly
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

static PROVINCE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\p{L}+$").expect("province code pattern is valid")
});

static POSTAL_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}$").expect("postal code pattern is valid"));

/// Accept exactly `true` or `false`
pub fn validate_boolean(value: &str) -> ValidationResult<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ValidationError::invalid_value(format!(
            "Value {} is not a valid boolean (true, false)",
            value
        ))),
    }
}

/// Reject cells that are empty after trimming; the value itself is kept as is
pub fn validate_non_empty(value: &str) -> ValidationResult<String> {
    if value.trim().is_empty() {
        return Err(ValidationError::invalid_value("Value is empty"));
    }
    Ok(value.to_string())
}

/// Return the cell unchanged
pub fn passthrough(value: &str) -> String {
    value.to_string()
}

/// Accept only canonical UTC timestamps (`YYYY-MM-DDTHH:mm:ss.sssZ`)
///
/// A value is canonical when parsing and formatting it again yields the
/// same text, so merely parseable dates such as `2024-07-23T10:26:11Z` fail.
pub fn validate_utc_timestamp(value: &str) -> ValidationResult<String> {
    if is_canonical_utc(value) {
        return Ok(value.to_string());
    }
    Err(ValidationError::invalid_value(format!(
        "Value {} is not a valid DateTime UTC string (Ex. {})",
        value, UTC_TIMESTAMP_EXAMPLE
    )))
}

/// Same as [`validate_utc_timestamp`] but an empty cell is returned unchanged
pub fn validate_optional_utc_timestamp(value: &str) -> ValidationResult<String> {
    if value.is_empty() {
        return Ok(String::new());
    }
    validate_utc_timestamp(value)
}

/// Accept integral numbers, including forms such as `22.0` or `1e3`
///
/// Values outside the `i64` range are rejected rather than saturated.
pub fn validate_integer(value: &str) -> ValidationResult<i64> {
    let trimmed = value.trim();
    match trimmed.parse::<f64>() {
        Ok(number)
            if !trimmed.is_empty()
                && number.fract() == 0.0
                && (-I64_BOUND..I64_BOUND).contains(&number) =>
        {
            Ok(number as i64)
        }
        _ => Err(ValidationError::invalid_value(format!(
            "Value {} is not a valid integer.",
            value
        ))),
    }
}

/// Parse a decimal-comma float
///
/// Dots are rewritten to `_` before commas become the decimal point, so any
/// dot left in the input makes the number unparseable.
pub fn validate_locale_float(value: &str) -> ValidationResult<f64> {
    let cleaned = value.replace('.', "_").replace(',', ".");
    let trimmed = cleaned.trim();
    match trimmed.parse::<f64>() {
        Ok(number) if !trimmed.is_empty() && number.is_finite() => Ok(number),
        _ => Err(ValidationError::invalid_value(format!(
            "Value {} is not a valid float. (Ex. {})",
            value, FLOAT_EXAMPLE
        ))),
    }
}

/// Accept one of the postal product codes
pub fn validate_product(value: &str) -> ValidationResult<String> {
    if PRODUCTS.contains(&value) {
        return Ok(value.to_string());
    }
    Err(ValidationError::invalid_value(format!(
        "Value {} not a valid product ({})",
        value,
        PRODUCTS.join(",")
    )))
}

/// Accept one of the delivery zone codes
pub fn validate_zone(value: &str) -> ValidationResult<String> {
    if ZONES.contains(&value) {
        return Ok(value.to_string());
    }
    Err(ValidationError::invalid_value(format!(
        "Value {} not a valid zone ({})",
        value,
        ZONES.join(",")
    )))
}

/// Accept a 5-digit postal code (CAP) or an alphabetic province code
///
/// The value is trimmed; the case of province codes is kept as written.
pub fn validate_geo_key(value: &str) -> ValidationResult<String> {
    let trimmed = value.trim();

    if PROVINCE_CODE.is_match(trimmed) {
        return Ok(trimmed.to_string());
    }

    if POSTAL_CODE.is_match(trimmed) {
        return Ok(trimmed.to_string());
    }

    Err(ValidationError::invalid_value(format!(
        "Value {} is not a valid CAP (5 digits) or province code",
        value
    )))
}

/// Format a UTC instant the way every timestamp in the output is written
pub fn format_utc(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Leap seconds (`:60`) are carried by chrono as nanoseconds past 10^9 and
/// are not canonical.
fn is_canonical_utc(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| {
            parsed.nanosecond() < 1_000_000_000
                && format_utc(parsed.with_timezone(&Utc)) == value
        })
        .unwrap_or(false)
}
