//! # Schema validation primitives
//!
//! Everything in the catalogue validates through the helpers in this module.
//! Validation is a boundary activity: inbound values are checked for shape,
//! required fields and literal correctness before any business logic gets to
//! see them, and failures are reported against a closed set of reasons.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Reasons a value can fail validation against a catalogue schema.
///
/// The set is closed. Consumers branch on these to decide between rejecting
/// a message outright and degrading gracefully, so adding a reason is a
/// contract change.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidateError {
    /// A required field is absent from the record.
    #[error("missing field `{0}`")]
    MissingField(String),

    /// A closed literal field holds a value outside its documented set.
    #[error("unknown literal `{value}` for `{field}`")]
    UnknownLiteral { field: String, value: String },

    /// A numeric command parameter lies outside its documented bounds.
    #[error("`{field}` is {value} but the documented range is [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// The value does not have the shape the schema requires.
    #[error("shape mismatch: {0}")]
    WrongShape(String),
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Deserialise a JSON value into a typed record, mapping serde failures onto
/// the closed [`ValidateError`] reasons.
pub fn typed<T: DeserializeOwned>(value: &Value) -> Result<T, ValidateError> {
    serde_json::from_value(value.clone()).map_err(|e| classify(&e))
}

/// Check that `value` is an object containing all of `required`, returning
/// the underlying map for further inspection.
///
/// Only top level presence is checked here, nested records are the business
/// of their own schemas.
pub fn require_fields<'v>(
    value: &'v Value,
    required: &[&'static str],
) -> Result<&'v Map<String, Value>, ValidateError> {
    let map = value
        .as_object()
        .ok_or_else(|| ValidateError::WrongShape(String::from("expected a JSON object")))?;

    for field in required {
        if !map.contains_key(*field) {
            return Err(ValidateError::MissingField(String::from(*field)));
        }
    }

    Ok(map)
}

/// Check a numeric parameter against its documented inclusive bounds.
pub fn check_range(field: &str, value: f64, range: (f64, f64)) -> Result<(), ValidateError> {
    let (min, max) = range;

    if value < min || value > max {
        return Err(ValidateError::OutOfRange {
            field: String::from(field),
            value,
            min,
            max,
        });
    }

    Ok(())
}

/// Map a serde error onto the closed validation taxonomy.
///
/// Serde reports failures as rendered messages, so the mapping goes by the
/// stable message prefixes. The classification is pinned by the tests below,
/// a serde upgrade that rewords its messages will show up there.
pub fn classify(err: &serde_json::Error) -> ValidateError {
    let msg = err.to_string();

    if msg.starts_with("missing field") {
        return ValidateError::MissingField(backticked(&msg).unwrap_or_default());
    }

    // deny_unknown_fields rejections are shape problems, not literal problems
    if msg.contains("unknown field `") {
        return ValidateError::WrongShape(msg);
    }

    if msg.contains("unknown variant `")
        || msg.contains("unknown literal `")
        || msg.contains("unknown endpoint `")
        || msg.contains("unknown error code `")
        || msg.contains("unknown joint `")
        || msg.contains("unknown region `")
    {
        return ValidateError::UnknownLiteral {
            field: String::from("variant"),
            value: backticked(&msg).unwrap_or_default(),
        };
    }

    ValidateError::WrongShape(msg)
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Pull the first backtick quoted token out of an error message.
fn backticked(msg: &str) -> Option<String> {
    msg.split('`').nth(1).map(String::from)
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
