//! Parse-with-default numeric helpers.
//!
//! Stored documents and form submissions carry numbers loosely: a field may
//! be a JSON number, a numeric string, an empty string, or missing entirely.
//! Every ingestion boundary (request bodies and stored-record reads) runs
//! values through these helpers so that defaulting is decided in exactly one
//! place. A value that fails to parse is never an error here; it falls back
//! to the documented default for its field.
//!
//! The [`lenient`] module exposes the same rules as serde
//! `deserialize_with` functions.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::Value;
use thiserror::Error;

/// Units produced per batch when the stored value is missing or invalid.
pub const DEFAULT_UNITS_PER_BATCH: u32 = 15;

/// Errors from strict numeric parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumericError {
    #[error("not a number: {0:?}")]
    NotANumber(String),
    #[error("must not be negative: {0}")]
    Negative(Decimal),
    #[error("is out of range: {0}")]
    OutOfRange(Decimal),
}

/// Parse a string as a decimal, accepting plain and scientific notation.
///
/// # Errors
///
/// Returns `NumericError::NotANumber` if the trimmed input is empty or not
/// numeric.
pub fn parse_decimal(input: &str) -> Result<Decimal, NumericError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(NumericError::NotANumber(input.to_string()));
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| NumericError::NotANumber(input.to_string()))
}

/// Largest magnitude a money amount or quantity may have.
///
/// Documents store amounts as JSON numbers (`f64`); anything at or below
/// this bound with cent precision reads back unchanged.
pub const MAX_STORED_AMOUNT: i64 = 1_000_000_000_000;

/// Check that an amount reads back from storage unchanged.
///
/// # Errors
///
/// Returns `NumericError::OutOfRange` if the magnitude exceeds
/// [`MAX_STORED_AMOUNT`].
pub fn storable_amount(value: Decimal) -> Result<Decimal, NumericError> {
    if value.abs() > Decimal::from(MAX_STORED_AMOUNT) {
        return Err(NumericError::OutOfRange(value));
    }
    Ok(value)
}

/// Check that an amount is storable and not below zero.
///
/// # Errors
///
/// Returns `NumericError::Negative` for values below zero and
/// `NumericError::OutOfRange` for values beyond [`MAX_STORED_AMOUNT`].
pub fn non_negative_amount(value: Decimal) -> Result<Decimal, NumericError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(NumericError::Negative(value));
    }
    storable_amount(value)
}

/// Coerce a JSON value to a decimal.
///
/// Numbers and numeric strings convert; everything else (empty strings,
/// booleans, null, objects) yields `None`.
#[must_use]
pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(Decimal::from(i));
            }
            if let Some(u) = n.as_u64() {
                return Some(Decimal::from(u));
            }
            parse_decimal(&n.to_string()).ok()
        }
        Value::String(s) => parse_decimal(s).ok(),
        _ => None,
    }
}

/// Coerce a JSON value to a decimal only if it is a JSON number.
///
/// Used where the stored field's presence as a number is itself meaningful
/// (a stored total that is not a number means "recompute from parts").
#[must_use]
pub fn decimal_from_number(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(_) => decimal_from_value(value),
        _ => None,
    }
}

/// Coerce a JSON value to a unit count.
///
/// Counts are whole units, so fractional values are truncated (`2.9` reads
/// as 2 and a stored `1.5` batches counts as one). Negative or non-numeric
/// values yield `None`.
#[must_use]
pub fn count_from_value(value: &Value) -> Option<u32> {
    let decimal = decimal_from_value(value)?;
    if decimal.is_sign_negative() && !decimal.is_zero() {
        return None;
    }
    decimal.trunc().to_u32()
}

/// Decimal value or zero.
#[must_use]
pub fn decimal_or_zero(value: Option<&Value>) -> Decimal {
    value.and_then(decimal_from_value).unwrap_or_default()
}

/// Unit count or zero.
#[must_use]
pub fn count_or_zero(value: Option<&Value>) -> u32 {
    value.and_then(count_from_value).unwrap_or(0)
}

/// Units per batch, defaulting to [`DEFAULT_UNITS_PER_BATCH`].
///
/// Zero is treated like a missing value.
#[must_use]
pub fn units_per_batch_or_default(value: Option<&Value>) -> u32 {
    value
        .and_then(count_from_value)
        .filter(|&units| units > 0)
        .unwrap_or(DEFAULT_UNITS_PER_BATCH)
}

/// Serde default for units-per-batch fields.
#[must_use]
pub const fn default_units_per_batch() -> u32 {
    DEFAULT_UNITS_PER_BATCH
}

/// Serde `deserialize_with` adapters for the coercion rules above.
///
/// Pair each with `#[serde(default)]` (or `default = "...")` so a missing
/// field takes the same default as an invalid one.
pub mod lenient {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Any numeric value, else zero.
    ///
    /// # Errors
    ///
    /// Only fails if the input is not valid JSON.
    pub fn decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(super::decimal_or_zero(Some(&value)))
    }

    /// Any numeric value, else `None`.
    ///
    /// # Errors
    ///
    /// Only fails if the input is not valid JSON.
    pub fn optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(super::decimal_from_value(&value))
    }

    /// JSON numbers only, else `None`.
    ///
    /// # Errors
    ///
    /// Only fails if the input is not valid JSON.
    pub fn number_only<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(super::decimal_from_number(&value))
    }

    /// Unit count, else zero.
    ///
    /// # Errors
    ///
    /// Only fails if the input is not valid JSON.
    pub fn count_or_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(super::count_or_zero(Some(&value)))
    }

    /// Unit count, else `None`.
    ///
    /// # Errors
    ///
    /// Only fails if the input is not valid JSON.
    pub fn optional_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(super::count_from_value(&value))
    }

    /// Units per batch, else the default of 15.
    ///
    /// # Errors
    ///
    /// Only fails if the input is not valid JSON.
    pub fn units_per_batch<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(super::units_per_batch_or_default(Some(&value)))
    }
}
