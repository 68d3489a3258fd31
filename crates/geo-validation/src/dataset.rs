//! Whole-dataset validation pass

use geo_model::{Catalog, RawTables, TableKind, index_by_id};
use geo_schema::SchemaRegistry;
use tracing::{debug, info};

use crate::domain::{check_name_whitespace, check_sub_district_fields};
use crate::engine::validate_rows;
use crate::integrity::{check_foreign_keys, check_unique_ids};
use crate::reporter::{IssueKind, ValidationReport};

/// Run every check over every table of `catalog` and collect the findings.
///
/// Per table (catalog order): schema validation of each row, then id
/// uniqueness. Then the foreign-key checks one level at a time, the
/// sub-district field rules, and name whitespace hygiene. A table absent
/// from `tables` reads as empty, so the dependent checks still run.
#[must_use]
pub fn validate_dataset(
    catalog: &Catalog,
    tables: &RawTables,
    schemas: &SchemaRegistry,
) -> ValidationReport {
    let mut report = ValidationReport::new();

    for spec in catalog.tables() {
        let rows = tables.rows(spec.kind);
        info!(table = %spec.table_name, rows = rows.len(), "Validating table");

        match schemas.get(&spec.entity_name) {
            Some(schema) => report.extend(validate_rows(&spec.table_name, rows, schema)),
            None => report.error(
                IssueKind::MissingSchema,
                format!("[{}]", spec.table_name),
                format!("Missing spec object for '{}'", spec.entity_name),
            ),
        }
        report.extend(check_unique_ids(&spec.table_name, rows));
    }

    for (child, fk) in catalog.foreign_keys() {
        let Some(parent) = catalog.table(fk.parent) else {
            debug!(child = %child.table_name, parent = ?fk.parent, "Parent table not in catalog");
            continue;
        };
        let parent_records = tables.records(parent.kind);
        let parent_index = index_by_id(&parent_records);
        report.extend(check_foreign_keys(
            &child.table_name,
            tables.rows(child.kind),
            &fk.field,
            &parent.table_name,
            &parent_index,
        ));
    }

    if let Some(spec) = catalog.table(TableKind::SubDistrict) {
        report.extend(check_sub_district_fields(
            &spec.table_name,
            tables.rows(spec.kind),
        ));
    }

    for spec in catalog.tables() {
        report.extend(check_name_whitespace(
            &spec.table_name,
            tables.rows(spec.kind),
            &spec.name_fields,
        ));
    }

    info!(
        errors = report.errors().len(),
        warnings = report.warnings().len(),
        "Validation pass finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_schema::{PropertyDef, Schema};
    use serde_json::json;

    fn registry() -> SchemaRegistry {
        let id_only = |name: &str| {
            Schema::new(name)
                .with_required(&["id"])
                .with_property(PropertyDef::new("id").typed(&["integer"]))
        };
        SchemaRegistry::new()
            .with("geography", id_only("geography").with_property(PropertyDef::new("name").typed(&["string"])))
            .with(
                "province",
                id_only("province")
                    .with_property(PropertyDef::new("name_th").typed(&["string"]))
                    .with_property(PropertyDef::new("name_en").typed(&["string"]))
                    .with_property(PropertyDef::new("geography_id").typed(&["integer"])),
            )
            .with(
                "district",
                id_only("district")
                    .with_property(PropertyDef::new("name_th").typed(&["string"]))
                    .with_property(PropertyDef::new("province_id").typed(&["integer"])),
            )
            .with(
                "sub_district",
                id_only("sub_district")
                    .with_property(PropertyDef::new("zip_code").typed(&["string", "integer"]))
                    .with_property(PropertyDef::new("district_id").typed(&["integer"])),
            )
    }

    fn consistent_tables() -> RawTables {
        RawTables::new()
            .with(TableKind::Geography, vec![json!({"id": 1, "name": "North"})])
            .with(
                TableKind::Province,
                vec![json!({"id": 10, "name_th": "เชียงใหม่", "name_en": "Chiang Mai", "geography_id": 1})],
            )
            .with(
                TableKind::District,
                vec![json!({"id": 100, "name_th": "เมือง", "province_id": 10})],
            )
            .with(
                TableKind::SubDistrict,
                vec![json!({"id": 1000, "zip_code": "50200", "district_id": 100})],
            )
    }

    #[test]
    fn test_consistent_dataset_passes() {
        let report = validate_dataset(&Catalog::default(), &consistent_tables(), &registry());
        assert!(report.passed(false), "{report}");
    }

    #[test]
    fn test_dangling_district_reported() {
        let tables = consistent_tables().with(
            TableKind::SubDistrict,
            vec![json!({"id": 1, "zip_code": "10110", "district_id": 99})],
        );
        let report = validate_dataset(&Catalog::default(), &tables, &registry());

        assert_eq!(report.errors().len(), 1);
        let issue = &report.errors()[0];
        assert_eq!(issue.kind, IssueKind::DanglingForeignKey);
        assert!(issue.message.contains("district_id=99"));
    }

    #[test]
    fn test_missing_table_keeps_checking_children() {
        let mut tables = RawTables::new();
        for kind in [TableKind::Geography, TableKind::District, TableKind::SubDistrict] {
            tables.insert(kind, consistent_tables().rows(kind).to_vec());
        }
        let report = validate_dataset(&Catalog::default(), &tables, &registry());

        let dangling: Vec<_> = report
            .errors()
            .iter()
            .filter(|i| i.kind == IssueKind::DanglingForeignKey)
            .collect();
        assert_eq!(dangling.len(), 1);
        assert!(dangling[0].message.contains("province_id=10"));
    }

    #[test]
    fn test_missing_schema_still_checks_ids() {
        let tables = consistent_tables().with(
            TableKind::Geography,
            vec![json!({"id": 1, "name": "North"}), json!({"id": 1, "name": "Again"})],
        );
        let schemas = SchemaRegistry::new();
        let report = validate_dataset(&Catalog::default(), &tables, &schemas);

        let kinds: Vec<IssueKind> = report.errors().iter().map(|i| i.kind).collect();
        assert_eq!(kinds.iter().filter(|k| **k == IssueKind::MissingSchema).count(), 4);
        assert!(kinds.contains(&IssueKind::DuplicateId));
    }

    #[test]
    fn test_whitespace_reported_twice() {
        let tables = consistent_tables().with(
            TableKind::Geography,
            vec![json!({"id": 1, "name": "North "})],
        );
        let report = validate_dataset(&Catalog::default(), &tables, &registry());

        assert!(report.passed(true));
        assert!(!report.passed(false));
        assert_eq!(report.warnings().len(), 2);
    }
}
