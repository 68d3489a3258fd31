#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # geo-adapter-sql
//!
//! SQL emitter for the flat per-table exports, MySQL dialect.
//!
//! A table export is an optional `CREATE TABLE` statement followed by a
//! single multi-row `INSERT`. Strings are single-quoted with embedded quotes
//! doubled, numbers are emitted as-is, and nulls become `NULL`.

pub mod schema;
pub mod sql;
pub mod writer;

pub use schema::{ColumnDef, ColumnType, SchemaMapping, TableSchema};
pub use sql::{quote_identifier, sql_literal};
pub use writer::SqlWriter;

use thiserror::Error;

/// Errors that can occur when rendering SQL.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Schema error: {details}")]
    Schema { details: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
