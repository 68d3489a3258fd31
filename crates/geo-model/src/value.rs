//! Lenient scalar coercions
//!
//! Raw tables are hand-authored, so ids and coordinates sometimes arrive as
//! strings. Integer fields accept JSON integers and digit-only strings;
//! number fields additionally accept floats and any string that parses as
//! a float. Booleans are never numbers.

use serde_json::Value;

/// Returns true when `value` is a JSON integer or a digit-only string that
/// fits in an `i64`, i.e. exactly when [`as_integer`] succeeds.
#[must_use]
pub fn is_integer(value: &Value) -> bool {
    as_integer(value).is_some()
}

/// Coerces `value` to an `i64`; JSON integers and digit-only strings only.
#[must_use]
pub fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) if is_digit_string(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Returns true when `value` is a JSON number or a string that parses as one.
#[must_use]
pub fn is_number(value: &Value) -> bool {
    as_number(value).is_some()
}

/// Coerces `value` to a float using the same rules as [`is_number`].
#[must_use]
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Text of a scalar as it appears in a flat export cell.
///
/// `null` becomes the empty string; nested values fall back to compact JSON.
#[must_use]
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn is_digit_string(s: &str) -> bool {
    let trimmed = s.trim();
    !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit())
}
