//! Table catalog
//!
//! The catalog is the single piece of configuration that names the four
//! tables, where their files live, which order their fields are exported
//! in, and how they link to each other. Validators, builders, and emitters
//! take a [`Catalog`] instead of reaching for module-level constants, so
//! they can be exercised against arbitrary in-memory fixtures.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Levels of the administrative hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Geography,
    Province,
    District,
    SubDistrict,
}

impl TableKind {
    /// All kinds, root first.
    pub const ALL: [TableKind; 4] = [
        TableKind::Geography,
        TableKind::Province,
        TableKind::District,
        TableKind::SubDistrict,
    ];
}

/// A child-to-parent link: `field` on the child holds a parent `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeySpec {
    pub field: String,
    pub parent: TableKind,
}

/// Configuration of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    pub kind: TableKind,
    /// Plural table name, e.g. `provinces`. Names raw files and flat exports.
    pub table_name: String,
    /// Singular entity name, e.g. `province`. Names schema documents,
    /// XML item elements, and flat API files.
    pub entity_name: String,
    /// Canonical field order for every exported copy of a record.
    pub columns: Vec<String>,
    /// Fields subject to the whitespace hygiene check.
    pub name_fields: Vec<String>,
    pub foreign_key: Option<ForeignKeySpec>,
}

impl TableSpec {
    pub fn new(kind: TableKind, table_name: impl Into<String>, entity_name: impl Into<String>) -> Self {
        Self {
            kind,
            table_name: table_name.into(),
            entity_name: entity_name.into(),
            columns: Vec::new(),
            name_fields: Vec::new(),
            foreign_key: None,
        }
    }

    #[must_use]
    pub fn with_columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| (*c).to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_name_fields(mut self, fields: &[&str]) -> Self {
        self.name_fields = fields.iter().map(|f| (*f).to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_foreign_key(mut self, field: impl Into<String>, parent: TableKind) -> Self {
        self.foreign_key = Some(ForeignKeySpec {
            field: field.into(),
            parent,
        });
        self
    }

    /// File name of the raw table, e.g. `provinces.json`.
    #[must_use]
    pub fn raw_file_name(&self) -> String {
        format!("{}.json", self.table_name)
    }

    /// XML element name of one record.
    #[must_use]
    pub fn item_tag(&self) -> &str {
        &self.entity_name
    }
}

/// Ordered set of table configurations, root table first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    tables: Vec<TableSpec>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Add a table; a spec for an already configured kind replaces it in place.
    #[must_use]
    pub fn with_table(mut self, spec: TableSpec) -> Self {
        match self.tables.iter().position(|t| t.kind == spec.kind) {
            Some(pos) => self.tables[pos] = spec,
            None => self.tables.push(spec),
        }
        self
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableSpec> {
        self.tables.iter()
    }

    pub fn table(&self, kind: TableKind) -> Option<&TableSpec> {
        self.tables.iter().find(|t| t.kind == kind)
    }

    /// Like [`Catalog::table`] but an error when the kind is not configured.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTable`] when `kind` has no spec.
    pub fn require(&self, kind: TableKind) -> Result<&TableSpec> {
        self.table(kind)
            .ok_or_else(|| Error::unknown_table(format!("{kind:?}")))
    }

    /// Tables that declare a foreign key, paired with that key.
    pub fn foreign_keys(&self) -> impl Iterator<Item = (&TableSpec, &ForeignKeySpec)> {
        self.tables
            .iter()
            .filter_map(|t| t.foreign_key.as_ref().map(|fk| (t, fk)))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        let timestamps = ["created_at", "updated_at", "deleted_at"];
        let with_timestamps = |cols: &[&'static str]| -> Vec<&'static str> {
            cols.iter().copied().chain(timestamps).collect()
        };

        Self::new()
            .with_table(
                TableSpec::new(TableKind::Geography, "geographies", "geography")
                    .with_columns(&["id", "name"])
                    .with_name_fields(&["name"]),
            )
            .with_table(
                TableSpec::new(TableKind::Province, "provinces", "province")
                    .with_columns(&with_timestamps(&["id", "name_th", "name_en", "geography_id"]))
                    .with_name_fields(&["name_th", "name_en"])
                    .with_foreign_key("geography_id", TableKind::Geography),
            )
            .with_table(
                TableSpec::new(TableKind::District, "districts", "district")
                    .with_columns(&with_timestamps(&["id", "name_th", "name_en", "province_id"]))
                    .with_name_fields(&["name_th", "name_en"])
                    .with_foreign_key("province_id", TableKind::Province),
            )
            .with_table(
                TableSpec::new(TableKind::SubDistrict, "sub_districts", "sub_district")
                    .with_columns(&with_timestamps(&[
                        "id",
                        "zip_code",
                        "name_th",
                        "name_en",
                        "district_id",
                        "lat",
                        "long",
                    ]))
                    .with_name_fields(&["name_th", "name_en"])
                    .with_foreign_key("district_id", TableKind::District),
            )
    }
}
