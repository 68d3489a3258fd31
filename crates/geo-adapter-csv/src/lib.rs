#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # geo-adapter-csv
//!
//! CSV emitter for the flat per-table exports.
//!
//! Each table becomes a header row of its canonical columns followed by one
//! row per record, cells rendered as plain text.
//!
//! ## Example Usage
//!
//! ```rust
//! use geo_adapter_csv::CsvWriter;
//! use serde_json::json;
//!
//! let records = vec![json!({"id": 1, "name": "North"}).as_object().cloned().unwrap()];
//! let columns = vec!["id".to_string(), "name".to_string()];
//!
//! let bytes = CsvWriter::new().render(&columns, &records).unwrap();
//! assert_eq!(bytes, b"id,name\r\n1,North\r\n");
//! ```

pub mod errors;
pub mod writer;

// Re-export main types
pub use errors::{CsvError, CsvResult};
pub use writer::CsvWriter;

pub use errors::CsvError as Error;
pub type Result<T> = CsvResult<T>;
