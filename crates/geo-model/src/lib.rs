#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # geo-model
//!
//! Record model, value coercions, and table catalog for the
//! geography → province → district → sub-district dataset.
//!
//! Raw tables are JSON arrays of flat objects. This crate keeps them as
//! [`serde_json::Value`]s (so malformed rows can still be reported on) and
//! provides the helpers every other crate needs to look at them:
//! lenient integer/number coercion, id indexes, and canonical field ordering.

/// Table catalog: names, file names, canonical orders, and foreign keys.
pub mod catalog;
/// Record helpers: canonical ordering and id indexes.
pub mod record;
/// In-memory raw tables keyed by kind.
pub mod table;
/// Lenient scalar coercions.
pub mod value;

pub use catalog::{Catalog, ForeignKeySpec, TableKind, TableSpec};
pub use record::{Record, group_by_field, index_by_id, order_keys};
pub use table::RawTables;
pub use value::{as_integer, as_number, cell_text, is_integer, is_number};

use thiserror::Error;

/// Errors that can occur when working with the model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Table not configured in catalog: {table}")]
    UnknownTable { table: String },
}

impl Error {
    /// Build an unknown-table error for a catalog lookup.
    pub fn unknown_table(table: impl Into<String>) -> Self {
        Self::UnknownTable {
            table: table.into(),
        }
    }
}

/// Crate-local result type for model operations.
pub type Result<T> = std::result::Result<T, Error>;
