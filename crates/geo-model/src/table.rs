//! In-memory raw tables

use std::collections::HashMap;

use serde_json::Value;

use crate::catalog::TableKind;
use crate::record::Record;

/// Raw rows of every loaded table, exactly as parsed.
///
/// A table that failed to load is simply absent and reads as empty, so
/// checks that depend on it still run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTables {
    tables: HashMap<TableKind, Vec<Value>>,
}

impl RawTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: TableKind, rows: Vec<Value>) {
        self.tables.insert(kind, rows);
    }

    #[must_use]
    pub fn with(mut self, kind: TableKind, rows: Vec<Value>) -> Self {
        self.insert(kind, rows);
        self
    }

    /// Rows of `kind`; empty when the table was not loaded.
    pub fn rows(&self, kind: TableKind) -> &[Value] {
        self.tables.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Object rows of `kind`, cloned. Non-object rows are skipped.
    pub fn records(&self, kind: TableKind) -> Vec<Record> {
        self.rows(kind)
            .iter()
            .filter_map(|row| row.as_object().cloned())
            .collect()
    }

    pub fn contains(&self, kind: TableKind) -> bool {
        self.tables.contains_key(&kind)
    }
}
