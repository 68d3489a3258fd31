#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # geo-validation
//!
//! Validation of the raw administrative tables.
//!
//! Four kinds of check feed one [`ValidationReport`]:
//!
//! - the schema validator ([`engine`]) checks each record against its
//!   entity schema: required keys, type unions with nullability, maximum
//!   length, enums, and date-time format;
//! - the integrity checker ([`integrity`]) checks id uniqueness per table
//!   and foreign keys one level at a time;
//! - the domain rule checker ([`domain`]) covers postal codes,
//!   coordinates, and name whitespace;
//! - [`validate_dataset`] runs all of them over a whole dataset.
//!
//! No check stops at the first problem. Findings are data, not errors.
//!
//! ## Example Usage
//!
//! ```rust
//! use geo_model::{Catalog, RawTables, TableKind};
//! use geo_schema::{PropertyDef, Schema, SchemaRegistry};
//! use geo_validation::validate_dataset;
//! use serde_json::json;
//!
//! let schemas = SchemaRegistry::new().with(
//!     "geography",
//!     Schema::new("geography")
//!         .with_required(&["id"])
//!         .with_property(PropertyDef::new("id").typed(&["integer"]))
//!         .with_property(PropertyDef::new("name").typed(&["string"])),
//! );
//! let tables = RawTables::new().with(
//!     TableKind::Geography,
//!     vec![json!({"id": 1, "name": "North"}), json!({"id": 1, "name": "Central"})],
//! );
//! let catalog = Catalog::new().with_table(
//!     Catalog::default().table(TableKind::Geography).cloned().unwrap(),
//! );
//!
//! let report = validate_dataset(&catalog, &tables, &schemas);
//! assert!(!report.passed(true));
//! assert_eq!(report.errors()[0].message, "duplicate id(s): [1]");
//! ```

pub mod dataset;
pub mod domain;
pub mod engine;
pub mod integrity;
pub mod reporter;
pub mod rules;

// Re-export main types
pub use dataset::validate_dataset;
pub use domain::{check_name_whitespace, check_sub_district_fields};
pub use engine::{row_context, validate_record, validate_rows};
pub use integrity::{check_foreign_keys, check_unique_ids};
pub use reporter::{Issue, IssueKind, Severity, ValidationReport, Verdict};
pub use rules::{has_edge_whitespace, in_range, is_iso8601_datetime, is_zip_code};

use geo_model::{Catalog, TableKind};
use geo_schema::SchemaRegistry;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when setting up a validation run
#[derive(Error, Debug)]
pub enum Error {
    #[error("Catalog error: {0}")]
    Catalog(#[from] geo_model::Error),

    #[error("Schema not registered: {0}")]
    SchemaNotRegistered(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Validate the rows of a single table against its registered schema,
/// including id uniqueness and name whitespace. Foreign keys need the
/// parent table and are left to [`validate_dataset`].
///
/// # Errors
///
/// Returns an error when `kind` is not in `catalog` or its schema is not
/// registered.
pub fn validate_table(
    catalog: &Catalog,
    kind: TableKind,
    rows: &[Value],
    schemas: &SchemaRegistry,
) -> Result<ValidationReport> {
    let spec = catalog.require(kind)?;
    let schema = schemas
        .get(&spec.entity_name)
        .ok_or_else(|| Error::SchemaNotRegistered(spec.entity_name.clone()))?;

    let mut report = ValidationReport::new();
    report.extend(validate_rows(&spec.table_name, rows, schema));
    report.extend(check_unique_ids(&spec.table_name, rows));
    if kind == TableKind::SubDistrict {
        report.extend(check_sub_district_fields(&spec.table_name, rows));
    }
    report.extend(check_name_whitespace(&spec.table_name, rows, &spec.name_fields));
    Ok(report)
}
