//! Output formats and JSON rendering

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::ser::{CompactFormatter, PrettyFormatter, Serializer};

use crate::{Error, Result};

/// One of the five flat export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
    Sql,
    Xlsx,
    Xml,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 5] = [
        ExportFormat::Csv,
        ExportFormat::Json,
        ExportFormat::Sql,
        ExportFormat::Xlsx,
        ExportFormat::Xml,
    ];

    /// File extension, also the name of the output directory
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Sql => "sql",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Xml => "xml",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ExportFormat::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::config(format!("unknown export format '{s}'")))
    }
}

/// Serialize `value` as UTF-8 JSON without ASCII escaping. `indent` spaces
/// per level; 0 writes compact JSON with no whitespace.
///
/// # Errors
///
/// Returns an error if `value` cannot be serialized.
pub fn render_json<T: Serialize + ?Sized>(value: &T, indent: usize) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    if indent == 0 {
        let mut ser = Serializer::with_formatter(&mut out, CompactFormatter);
        value
            .serialize(&mut ser)
            .map_err(|e| Error::render("json", e.to_string()))?;
    } else {
        let pad = vec![b' '; indent];
        let mut ser = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(&pad));
        value
            .serialize(&mut ser)
            .map_err(|e| Error::render("json", e.to_string()))?;
    }
    Ok(out)
}
