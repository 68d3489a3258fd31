#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # geo-adapter-xml
//!
//! XML emitter for the flat per-table exports.
//!
//! A table becomes one root element named after the table holding one item
//! element per record; every field is a child element with the value as
//! text. Null and empty values are written as empty elements.
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <provinces>
//!   <province>
//!     <id>1</id>
//!     <name_en>Bangkok</name_en>
//!     <deleted_at/>
//!   </province>
//! </provinces>
//! ```

pub mod writer;

pub use writer::{XmlWriter, is_valid_name};

use thiserror::Error;

/// Errors that can occur when rendering XML
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid XML element name: '{0}'")]
    InvalidName(String),

    #[error("XML write error: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
