//! Table definitions for `CREATE TABLE` generation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::sql::quote_identifier;

/// MySQL column types used by the administrative tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    /// `int(N)`
    Int(u32),
    /// `varchar(N)`
    Varchar(u32),
    Double,
    DateTime,
}

impl ColumnType {
    fn sql(self) -> String {
        match self {
            ColumnType::Int(width) => format!("int({width})"),
            ColumnType::Varchar(len) => format!("varchar({len})"),
            ColumnType::Double => "double".to_string(),
            ColumnType::DateTime => "datetime".to_string(),
        }
    }
}

/// Column definition in a table schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub column_type: ColumnType,
    pub nullable: bool,
    pub primary_key: bool,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable: false,
            primary_key: false,
        }
    }

    #[must_use]
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }
}

/// Table schema used for DDL generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnDef>,
}

impl TableSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn primary_key(&self) -> Option<&ColumnDef> {
        self.columns.iter().find(|column| column.primary_key)
    }

    /// `CREATE TABLE` statement, one column per line, InnoDB with utf8mb4.
    pub fn create_table_sql(&self) -> String {
        let mut lines: Vec<String> = self
            .columns
            .iter()
            .map(|column| format!("  {}", column_definition_sql(column)))
            .collect();

        if let Some(pk) = self.primary_key() {
            lines.push(format!("  PRIMARY KEY ({})", quote_identifier(&pk.name)));
        }

        format!(
            "CREATE TABLE {} (\n{}\n) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci;",
            quote_identifier(&self.name),
            lines.join(",\n")
        )
    }
}

/// Collection of table schemas keyed by table name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaMapping {
    tables: HashMap<String, TableSchema>,
}

impl SchemaMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_table(&mut self, schema: TableSchema) {
        self.tables.insert(schema.name.clone(), schema);
    }

    #[must_use]
    pub fn with_table(mut self, schema: TableSchema) -> Self {
        self.add_table(schema);
        self
    }

    pub fn table(&self, name: &str) -> Option<&TableSchema> {
        self.tables.get(name)
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableSchema> {
        self.tables.values()
    }

    /// Definitions of `geographies`, `provinces`, `districts` and
    /// `sub_districts`.
    pub fn administrative() -> Self {
        let id = || ColumnDef::new("id", ColumnType::Int(11)).primary_key();
        let name = |column: &str| ColumnDef::new(column, ColumnType::Varchar(150));
        let fk = |column: &str| ColumnDef::new(column, ColumnType::Int(11));
        let with_timestamps = |table: TableSchema| {
            ["created_at", "updated_at", "deleted_at"]
                .into_iter()
                .fold(table, |table, column| {
                    table.with_column(ColumnDef::new(column, ColumnType::DateTime).nullable(true))
                })
        };

        Self::new()
            .with_table(
                TableSchema::new("geographies")
                    .with_column(id())
                    .with_column(ColumnDef::new("name", ColumnType::Varchar(255))),
            )
            .with_table(with_timestamps(
                TableSchema::new("provinces")
                    .with_column(id())
                    .with_column(name("name_th"))
                    .with_column(name("name_en"))
                    .with_column(fk("geography_id")),
            ))
            .with_table(with_timestamps(
                TableSchema::new("districts")
                    .with_column(id())
                    .with_column(name("name_th"))
                    .with_column(name("name_en"))
                    .with_column(fk("province_id")),
            ))
            .with_table(with_timestamps(
                TableSchema::new("sub_districts")
                    .with_column(id())
                    .with_column(ColumnDef::new("zip_code", ColumnType::Int(11)))
                    .with_column(name("name_th"))
                    .with_column(name("name_en"))
                    .with_column(fk("district_id"))
                    .with_column(ColumnDef::new("lat", ColumnType::Double).nullable(true))
                    .with_column(ColumnDef::new("long", ColumnType::Double).nullable(true)),
            ))
    }
}

fn column_definition_sql(column: &ColumnDef) -> String {
    let null_clause = if column.nullable {
        "DEFAULT NULL"
    } else {
        "NOT NULL"
    };
    format!(
        "{} {} {null_clause}",
        quote_identifier(&column.name),
        column.column_type.sql()
    )
}
