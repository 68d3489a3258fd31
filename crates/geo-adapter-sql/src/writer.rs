//! SQL table export writer

use std::fmt::Write as _;
use std::io::Write;

use geo_model::Record;
use serde_json::Value;
use tracing::debug;

use crate::schema::SchemaMapping;
use crate::sql::{quote_identifier, sql_literal};
use crate::{Error, Result};

/// Renders one table as `CREATE TABLE` (optional) plus one batched `INSERT`.
#[derive(Debug, Clone)]
pub struct SqlWriter {
    mapping: SchemaMapping,
    include_create_table: bool,
}

impl Default for SqlWriter {
    fn default() -> Self {
        Self {
            mapping: SchemaMapping::administrative(),
            include_create_table: true,
        }
    }
}

impl SqlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_mapping(mut self, mapping: SchemaMapping) -> Self {
        self.mapping = mapping;
        self
    }

    #[must_use]
    pub fn include_create_table(mut self, enabled: bool) -> Self {
        self.include_create_table = enabled;
        self
    }

    /// Render `records` of `table` with one value per entry of `columns`.
    ///
    /// An empty table yields only the DDL (or nothing). Missing fields are
    /// written as `NULL`.
    ///
    /// # Errors
    ///
    /// Returns an error when DDL is requested for a table the mapping does
    /// not define.
    pub fn render(&self, table: &str, columns: &[String], records: &[Record]) -> Result<String> {
        let mut out = String::new();

        if self.include_create_table {
            let schema = self.mapping.table(table).ok_or_else(|| Error::Schema {
                details: format!("No table definition for '{table}'"),
            })?;
            out.push_str(schema.create_table_sql().trim_end());
            out.push_str("\n\n");
        }

        if records.is_empty() {
            debug!(table, "No rows, INSERT omitted");
            return Ok(out);
        }

        let column_list: Vec<String> = columns.iter().map(|c| quote_identifier(c)).collect();
        let _ = writeln!(
            out,
            "INSERT INTO {} ({}) VALUES",
            quote_identifier(table),
            column_list.join(", ")
        );

        let rows: Vec<String> = records
            .iter()
            .map(|record| {
                let values: Vec<String> = columns
                    .iter()
                    .map(|column| sql_literal(record.get(column).unwrap_or(&Value::Null)))
                    .collect();
                format!("  ({})", values.join(", "))
            })
            .collect();
        out.push_str(&rows.join(",\n"));
        out.push_str(";\n");

        debug!(table, rows = records.len(), "Rendered SQL");
        Ok(out)
    }

    /// Render and write to `writer`.
    ///
    /// # Errors
    ///
    /// See [`SqlWriter::render`]; also fails when the writer does.
    pub fn write_table<W: Write>(
        &self,
        mut writer: W,
        table: &str,
        columns: &[String],
        records: &[Record],
    ) -> Result<()> {
        let sql = self.render(table, columns, records)?;
        writer.write_all(sql.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_batched_insert_with_ddl() {
        let records = vec![
            record(json!({"id": 1, "name": "ภาคเหนือ"})),
            record(json!({"name": "O'Reilly", "id": 2})),
            record(json!({"id": 3})),
        ];
        let sql = SqlWriter::new()
            .render("geographies", &columns(&["id", "name"]), &records)
            .unwrap();

        let expected = "CREATE TABLE `geographies` (\n  `id` int(11) NOT NULL,\n  `name` varchar(255) NOT NULL,\n  PRIMARY KEY (`id`)\n) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci;\n\n\
INSERT INTO `geographies` (`id`, `name`) VALUES\n  (1, 'ภาคเหนือ'),\n  (2, 'O''Reilly'),\n  (3, NULL);\n";
        assert_eq!(sql, expected);
    }

    #[test]
    fn test_no_create_and_empty_table() {
        let writer = SqlWriter::new().include_create_table(false);
        assert_eq!(writer.render("provinces", &columns(&["id"]), &[]).unwrap(), "");

        let sql = writer
            .render("anything", &columns(&["id"]), &[record(json!({"id": 7}))])
            .unwrap();
        assert_eq!(sql, "INSERT INTO `anything` (`id`) VALUES\n  (7);\n");
    }

    #[test]
    fn test_empty_table_keeps_ddl() {
        let sql = SqlWriter::new()
            .render("geographies", &columns(&["id", "name"]), &[])
            .unwrap();
        assert!(sql.starts_with("CREATE TABLE `geographies`"));
        assert!(sql.ends_with(";\n\n"));
        assert!(!sql.contains("INSERT"));
    }

    #[test]
    fn test_unknown_table_ddl_is_error() {
        let err = SqlWriter::new()
            .render("villages", &columns(&["id"]), &[])
            .unwrap_err();
        assert!(matches!(err, Error::Schema { .. }));
    }
}
