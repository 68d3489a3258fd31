//! Loading raw tables and schema documents from a data root
//!
//! Nothing here fails: a missing or unreadable input becomes an error issue
//! and the affected table (or schema) is left out, so validation can still
//! run every check that does not depend on it.

use std::io::ErrorKind;

use geo_model::{Catalog, RawTables, TableSpec};
use geo_schema::{SchemaLoader, SchemaRegistry};
use geo_validation::{IssueKind, ValidationReport};
use serde_json::Value;
use tracing::{debug, info};

use crate::layout::DataLayout;

/// Everything read from disk for one run
#[derive(Debug, Clone, Default)]
pub struct LoadedDataset {
    pub tables: RawTables,
    pub schemas: SchemaRegistry,
    /// Problems met while loading; all errors
    pub report: ValidationReport,
}

/// Load every schema and raw table the catalog names.
pub fn load_dataset(layout: &DataLayout, catalog: &Catalog) -> LoadedDataset {
    let mut dataset = LoadedDataset::default();
    info!(root = %layout.root().display(), "Loading dataset");

    let loader = SchemaLoader::new(layout.spec_dir());
    for spec in catalog.tables() {
        load_schema(layout, &loader, spec, &mut dataset);
    }
    for spec in catalog.tables() {
        load_table(layout, spec, &mut dataset);
    }

    debug!(
        schemas = dataset.schemas.len(),
        issues = dataset.report.errors().len(),
        "Dataset loaded"
    );
    dataset
}

fn load_schema(
    layout: &DataLayout,
    loader: &SchemaLoader,
    spec: &TableSpec,
    dataset: &mut LoadedDataset,
) {
    let path = loader.locate(&spec.entity_name);
    let rel = layout.display(&path);

    match loader.load(&spec.entity_name) {
        Ok(schema) => {
            debug!(entity = %spec.entity_name, path = %rel, "Loaded schema");
            dataset.schemas.register(spec.entity_name.clone(), schema);
        }
        Err(geo_schema::Error::NotFound(_)) => {
            dataset
                .report
                .error(IssueKind::MissingFile, "", format!("Spec not found: {rel}"));
        }
        Err(e) => {
            dataset.report.error(
                IssueKind::ParseError,
                "",
                format!("Spec parse error: {rel} ({e})"),
            );
        }
    }
}

fn load_table(layout: &DataLayout, spec: &TableSpec, dataset: &mut LoadedDataset) {
    let path = layout.raw_path(spec);
    let rel = layout.display(&path);

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            dataset
                .report
                .error(IssueKind::MissingFile, "", format!("Raw data not found: {rel}"));
            return;
        }
        Err(e) => {
            dataset
                .report
                .error(IssueKind::ParseError, "", format!("Raw parse error: {rel} ({e})"));
            return;
        }
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Array(rows)) => {
            debug!(table = %spec.table_name, rows = rows.len(), "Loaded raw table");
            dataset.tables.insert(spec.kind, rows);
        }
        Ok(_) => dataset.report.error(
            IssueKind::NotAnArray,
            "",
            format!("Raw {rel} must be a JSON array"),
        ),
        Err(e) => dataset
            .report
            .error(IssueKind::ParseError, "", format!("Raw parse error: {rel} ({e})")),
    }
}
