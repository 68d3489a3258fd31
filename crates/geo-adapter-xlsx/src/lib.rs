#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # geo-adapter-xlsx
//!
//! Spreadsheet emitter for the flat per-table exports: one worksheet per
//! table, a bold header row of canonical columns, then one row per record.
//! Numbers are written as numeric cells, strings as text, nulls as blanks.

pub mod writer;

pub use writer::XlsxWriter;

use thiserror::Error;

/// Errors that can occur when rendering a workbook
#[derive(Error, Debug)]
pub enum Error {
    #[error("Workbook error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("Table too large for a worksheet: {details}")]
    TooLarge { details: String },
}

pub type Result<T> = std::result::Result<T, Error>;
