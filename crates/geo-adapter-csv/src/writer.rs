//! CSV writer

use std::io::Write;

use geo_model::{Record, cell_text};
use serde_json::Value;
use tracing::{debug, trace};

use crate::{Error, Result};

/// Writer for flat tables: comma separated, CRLF terminated, header first.
#[derive(Debug, Clone, Default)]
pub struct CsvWriter;

impl CsvWriter {
    /// Create a new CSV writer
    pub fn new() -> Self {
        Self
    }

    /// Write `records` with one column per entry of `columns`, in that order.
    /// Fields not listed are dropped; missing and null fields become empty
    /// cells.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn write_table<W: Write>(
        &self,
        writer: W,
        columns: &[String],
        records: &[Record],
    ) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::CRLF)
            .from_writer(writer);

        csv_writer
            .write_record(columns)
            .map_err(|e| Error::write_at(0, e.to_string()))?;

        for (idx, record) in records.iter().enumerate() {
            let row = record_to_row(record, columns);
            csv_writer
                .write_record(&row)
                .map_err(|e| Error::write_at(idx + 1, e.to_string()))?;
            trace!(?row, "Wrote CSV row");
        }

        csv_writer.flush()?;
        debug!(record_count = records.len(), "Finished writing CSV");
        Ok(())
    }

    /// Render a table to bytes
    ///
    /// # Errors
    ///
    /// See [`CsvWriter::write_table`].
    pub fn render(&self, columns: &[String], records: &[Record]) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_table(&mut buffer, columns, records)?;
        Ok(buffer)
    }
}

fn record_to_row(record: &Record, columns: &[String]) -> Vec<String> {
    columns
        .iter()
        .map(|column| match record.get(column) {
            None | Some(Value::Null) => String::new(),
            Some(value) => cell_text(value),
        })
        .collect()
}
