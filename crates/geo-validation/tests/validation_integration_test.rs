//! Integration tests for geo-validation crate
//!
//! These tests run whole validation passes over small in-memory datasets.

use geo_model::{Catalog, RawTables, TableKind};
use geo_schema::{PropertyDef, Schema, SchemaRegistry};
use geo_validation::{
    IssueKind, Verdict, validate_dataset, validate_record, validate_rows, validate_table,
};
use serde_json::{Value, json};

/// Schemas shaped like the published entity specs
fn schemas() -> SchemaRegistry {
    let timestamps = |schema: Schema| {
        ["created_at", "updated_at", "deleted_at"]
            .into_iter()
            .fold(schema, |schema, field| {
                schema.with_property(PropertyDef::new(field).typed(&["string", "null"]).date_time())
            })
    };
    let names = |schema: Schema| {
        schema
            .with_property(PropertyDef::new("name_th").typed(&["string"]).max_length(150))
            .with_property(PropertyDef::new("name_en").typed(&["string"]).max_length(150))
    };

    SchemaRegistry::new()
        .with(
            "geography",
            Schema::new("geography")
                .with_required(&["id", "name"])
                .with_property(PropertyDef::new("id").typed(&["integer"]))
                .with_property(PropertyDef::new("name").typed(&["string"]).max_length(255)),
        )
        .with(
            "province",
            timestamps(names(
                Schema::new("province")
                    .with_required(&["id", "name_th", "name_en", "geography_id"])
                    .with_property(PropertyDef::new("id").typed(&["integer"])),
            ))
            .with_property(PropertyDef::new("geography_id").typed(&["integer"])),
        )
        .with(
            "district",
            timestamps(names(
                Schema::new("district")
                    .with_required(&["id", "name_th", "name_en", "province_id"])
                    .with_property(PropertyDef::new("id").typed(&["integer"])),
            ))
            .with_property(PropertyDef::new("province_id").typed(&["integer"])),
        )
        .with(
            "sub_district",
            timestamps(names(
                Schema::new("sub_district")
                    .with_required(&["id", "zip_code", "name_th", "name_en", "district_id"])
                    .with_property(PropertyDef::new("id").typed(&["integer"]))
                    .with_property(PropertyDef::new("zip_code").typed(&["integer", "string"])),
            ))
            .with_property(PropertyDef::new("district_id").typed(&["integer"]))
            .with_property(PropertyDef::new("lat").typed(&["number", "null"]))
            .with_property(PropertyDef::new("long").typed(&["number", "null"])),
        )
}

fn dataset() -> RawTables {
    RawTables::new()
        .with(
            TableKind::Geography,
            vec![json!({"id": 1, "name": "ภาคเหนือ"}), json!({"id": 2, "name": "ภาคกลาง"})],
        )
        .with(
            TableKind::Province,
            vec![
                json!({"id": 1, "name_th": "กรุงเทพมหานคร", "name_en": "Bangkok", "geography_id": 2,
                       "created_at": "2020-01-01T00:00:00Z", "updated_at": "2020-01-01 00:00:00", "deleted_at": null}),
                json!({"id": 38, "name_th": "เชียงใหม่", "name_en": "Chiang Mai", "geography_id": 1,
                       "created_at": "2019-08-09T03:33:09.000+07:00", "updated_at": null, "deleted_at": null}),
            ],
        )
        .with(
            TableKind::District,
            vec![
                json!({"id": 1001, "name_th": "เขตพระนคร", "name_en": "Khet Phra Nakhon", "province_id": 1}),
                json!({"id": 5001, "name_th": "เมืองเชียงใหม่", "name_en": "Mueang Chiang Mai", "province_id": 38}),
            ],
        )
        .with(
            TableKind::SubDistrict,
            vec![
                json!({"id": 100101, "zip_code": 10200, "name_th": "พระบรมมหาราชวัง",
                       "name_en": "Phra Borom Maha Ratchawang", "district_id": 1001, "lat": 13.751, "long": 100.492}),
                json!({"id": 500101, "zip_code": "50200", "name_th": "ศรีภูมิ", "name_en": "Si Phum",
                       "district_id": 5001, "lat": null, "long": null}),
            ],
        )
}

#[test]
fn test_clean_dataset_passes() {
    let report = validate_dataset(&Catalog::default(), &dataset(), &schemas());
    assert!(report.errors().is_empty(), "{report}");
    assert!(report.warnings().is_empty(), "{report}");
    assert_eq!(report.verdict(true), Verdict::Pass);
}

#[test]
fn test_zulu_created_at_validates() {
    let record = json!({"id": 1, "name_th": "ก", "name_en": "A", "geography_id": 1,
                        "created_at": "2020-01-01T00:00:00Z"});
    let schema = schemas().get("province").cloned().expect("province schema");
    let issues = validate_record(record.as_object().expect("object"), &schema, "[provinces] row 1");
    assert!(issues.is_empty(), "{issues:?}");
}

#[test]
fn test_dangling_sub_district_parent() {
    let mut tables = dataset();
    let mut rows = tables.rows(TableKind::SubDistrict).to_vec();
    rows.push(json!({"id": 1, "zip_code": "10110", "name_th": "ก", "name_en": "A", "district_id": 99}));
    tables.insert(TableKind::SubDistrict, rows);

    let report = validate_dataset(&Catalog::default(), &tables, &schemas());
    assert_eq!(report.errors().len(), 1, "{report}");
    assert_eq!(report.errors()[0].kind, IssueKind::DanglingForeignKey);
    assert_eq!(
        report.errors()[0].to_string(),
        "[sub_districts] row 3: district_id=99 not found in districts.id"
    );
    assert_eq!(report.verdict(false), Verdict::Fail);
}

#[test]
fn test_missing_required_names_property() {
    let schema = schemas().get("district").cloned().expect("district schema");
    for field in &schema.required {
        let mut record = json!({"id": 1, "name_th": "ก", "name_en": "A", "province_id": 1});
        record.as_object_mut().expect("object").remove(field);
        let issues = validate_record(record.as_object().expect("object"), &schema, "ctx");
        assert!(
            issues
                .iter()
                .any(|i| i.is_error() && i.message.contains(field.as_str())),
            "no error naming {field}"
        );
    }
}

#[test]
fn test_validation_is_idempotent() {
    let rows = vec![
        json!({"id": "x", "name_th": 5, "name_en": " B ", "geography_id": null, "extra": 1,
               "created_at": "yesterday"}),
        json!([1, 2]),
    ];
    let schema = schemas().get("province").cloned().expect("province schema");
    let first = validate_rows("provinces", &rows, &schema);
    let second = validate_rows("provinces", &rows, &schema);
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn test_duplicate_ids_single_aggregated_error() {
    let rows: Vec<Value> = [3, 1, 3, 1, 2, 3]
        .into_iter()
        .map(|id| json!({"id": id, "name": "n"}))
        .collect();
    let report = validate_table(&Catalog::default(), TableKind::Geography, &rows, &schemas())
        .expect("geography configured");

    let duplicates: Vec<_> = report
        .errors()
        .iter()
        .filter(|i| i.kind == IssueKind::DuplicateId)
        .collect();
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].message, "duplicate id(s): [1, 3]");
}

#[test]
fn test_validate_table_requires_schema() {
    let result = validate_table(
        &Catalog::default(),
        TableKind::Geography,
        &[],
        &SchemaRegistry::new(),
    );
    assert!(result.is_err());
}

#[test]
fn test_every_check_reported_in_one_pass() {
    let tables = RawTables::new()
        .with(TableKind::Geography, vec![json!({"id": 1, "name": "North"})])
        .with(
            TableKind::Province,
            vec![json!({"id": 10, "name_th": "ก", "name_en": "A", "geography_id": 7})],
        )
        .with(
            TableKind::SubDistrict,
            vec![json!({"id": 5, "zip_code": "1234", "name_th": "ข", "name_en": "B",
                        "district_id": 3, "lat": 95, "long": 0})],
        );

    let report = validate_dataset(&Catalog::default(), &tables, &schemas());
    let kinds: Vec<IssueKind> = report.errors().iter().map(|i| i.kind).collect();
    assert!(kinds.contains(&IssueKind::DanglingForeignKey));
    assert!(kinds.contains(&IssueKind::InvalidZipCode));
    assert!(kinds.contains(&IssueKind::InvalidLatitude));
    assert_eq!(
        kinds
            .iter()
            .filter(|k| **k == IssueKind::DanglingForeignKey)
            .count(),
        2
    );
}

#[test]
fn test_id_beyond_i64_rejected_by_schema_and_integrity_alike() {
    let rows = vec![json!({"id": u64::MAX, "name": "North"})];
    let report = validate_table(&Catalog::default(), TableKind::Geography, &rows, &schemas())
        .expect("geography configured");

    let kinds: Vec<IssueKind> = report.errors().iter().map(|i| i.kind).collect();
    assert!(kinds.contains(&IssueKind::TypeMismatch), "{report}");
    assert!(kinds.contains(&IssueKind::InvalidId), "{report}");
}
