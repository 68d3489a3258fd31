//! Identifier quoting and literal escaping

use geo_model::cell_text;
use serde_json::Value;

/// Backtick-quoted identifier with embedded backticks doubled.
pub fn quote_identifier(value: &str) -> String {
    let escaped = value.replace('`', "``");
    format!("`{escaped}`")
}

/// SQL literal for one cell.
///
/// `NULL` for null, numbers unquoted, everything else single-quoted with
/// `'` doubled. Booleans and nested values are quoted as their text.
pub fn sql_literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Number(n) => n.to_string(),
        other => {
            let escaped = cell_text(other).replace('\'', "''");
            format!("'{escaped}'")
        }
    }
}
