#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # geo-schema
//!
//! Schema model, loader, and registry for raw table validation.
//!
//! Schemas are JSON Schema documents, but only a fixed subset of keywords is
//! honored: `required`, `properties`, and per property `type` (a name or a
//! list of names, `null` marking nullability), `maxLength`, `enum`, and
//! `format: date-time`. Each property becomes a flat list of tagged
//! [`Constraint`]s; there is no `$ref`, composition, or nesting.

pub mod loader;
pub mod model;
pub mod registry;

pub use loader::SchemaLoader;
pub use model::{Constraint, FieldFormat, PropertyDef, Schema, TypeDispatch, TypeName, TypeSet};
pub use registry::SchemaRegistry;

use thiserror::Error;

/// Errors that can occur when working with schemas
#[derive(Error, Debug)]
pub enum Error {
    #[error("Schema not found: {0}")]
    NotFound(String),

    #[error("Invalid schema format: {0}")]
    InvalidFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
