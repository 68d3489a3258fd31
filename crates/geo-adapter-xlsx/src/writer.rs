//! Workbook writer

use geo_model::{Record, cell_text};
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, Workbook, Worksheet};
use serde_json::Value;
use tracing::debug;

use crate::{Error, Result};

/// Excel limits worksheet names to 31 characters.
const MAX_SHEET_NAME: usize = 31;

/// Writes one table as a single-sheet workbook
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxWriter;

impl XlsxWriter {
    pub fn new() -> Self {
        Self
    }

    /// Render `records` as an `.xlsx` file, columns in `columns` order.
    ///
    /// # Errors
    ///
    /// Returns an error if the table exceeds worksheet limits or the
    /// workbook cannot be assembled.
    pub fn render(&self, sheet: &str, columns: &[String], records: &[Record]) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        // Pinned so identical inputs give identical bytes
        let created = ExcelDateTime::from_ymd(2000, 1, 1)?;
        workbook.set_properties(&DocProperties::new().set_creation_datetime(&created));

        let worksheet = workbook.add_worksheet();
        let name: String = sheet.chars().take(MAX_SHEET_NAME).collect();
        worksheet.set_name(name)?;

        let header = Format::new().set_bold();
        for (col, column) in columns.iter().enumerate() {
            worksheet.write_string_with_format(0, col_index(col)?, column, &header)?;
        }

        for (idx, record) in records.iter().enumerate() {
            let row = row_index(idx + 1)?;
            for (col, column) in columns.iter().enumerate() {
                if let Some(value) = record.get(column) {
                    write_cell(worksheet, row, col_index(col)?, value)?;
                }
            }
        }

        let bytes = workbook.save_to_buffer()?;
        debug!(sheet, rows = records.len(), bytes = bytes.len(), "Rendered workbook");
        Ok(bytes)
    }
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, value: &Value) -> Result<()> {
    match value {
        Value::Null => {}
        Value::Number(n) => match n.as_f64() {
            Some(number) => {
                worksheet.write_number(row, col, number)?;
            }
            None => {
                worksheet.write_string(row, col, n.to_string())?;
            }
        },
        Value::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        other => {
            worksheet.write_string(row, col, cell_text(other))?;
        }
    }
    Ok(())
}

fn row_index(idx: usize) -> Result<u32> {
    u32::try_from(idx).map_err(|_| Error::TooLarge {
        details: format!("row {idx}"),
    })
}

fn col_index(idx: usize) -> Result<u16> {
    u16::try_from(idx).map_err(|_| Error::TooLarge {
        details: format!("column {idx}"),
    })
}
