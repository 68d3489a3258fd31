//! End-to-end runs over a copy of the workspace test dataset

use std::fs;
use std::path::{Path, PathBuf};

use geo_pipeline::{ExportFormat, Pipeline, PipelineConfig, Stage};
use serde_json::Value;
use tempfile::TempDir;

fn testdata() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../testdata")
}

fn copy_dir(from: &Path, to: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), target)?;
        }
    }
    Ok(())
}

fn scratch_root() -> anyhow::Result<TempDir> {
    let dir = tempfile::tempdir()?;
    copy_dir(&testdata(), dir.path())?;
    Ok(dir)
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    Ok(serde_json::from_slice(&fs::read(path)?)?)
}

#[test]
fn test_make_writes_every_output() -> anyhow::Result<()> {
    let root = scratch_root()?;
    let summary = Pipeline::new(PipelineConfig::new(root.path())).run()?;

    assert!(summary.is_success(), "{summary}");
    assert_eq!(
        summary.completed,
        vec![Stage::Validate, Stage::ExportFormats, Stage::ExportApi]
    );
    assert!(summary.notices.is_empty());

    for table in ["geographies", "provinces", "districts", "sub_districts"] {
        for format in ExportFormat::ALL {
            let path = root
                .path()
                .join(format!("formats/{format}/{table}.{}", format.extension()));
            assert!(path.is_file(), "missing {}", path.display());
        }
    }
    for name in [
        "province",
        "district",
        "sub_district",
        "province_with_district_and_sub_district",
        "sub_district_with_district_and_province",
    ] {
        assert!(root.path().join(format!("api/latest/{name}.json")).is_file());
    }
    Ok(())
}

#[test]
fn test_nested_views_follow_foreign_keys() -> anyhow::Result<()> {
    let root = scratch_root()?;
    Pipeline::new(PipelineConfig::new(root.path()))
        .export_api()?;

    let nested = read_json(
        &root
            .path()
            .join("api/latest/province_with_district_and_sub_district.json"),
    )?;
    let bangkok = &nested[0];
    assert_eq!(bangkok["name_en"], "Bangkok");
    let subs = bangkok["districts"][0]["sub_districts"]
        .as_array()
        .map(Vec::len);
    assert_eq!(subs, Some(2));
    assert_eq!(nested[1]["districts"][0]["sub_districts"][0]["id"], 500101);

    let child = read_json(
        &root
            .path()
            .join("api/latest/sub_district_with_district_and_province.json"),
    )?;
    assert_eq!(child[2]["district"]["province"]["name_en"], "Chiang Mai");
    Ok(())
}

#[test]
fn test_flat_json_reorders_fields() -> anyhow::Result<()> {
    let root = scratch_root()?;
    Pipeline::new(PipelineConfig::new(root.path()).with_formats(vec![ExportFormat::Json]))
        .export_formats()?;

    let provinces = read_json(&root.path().join("formats/json/provinces.json"))?;
    let keys: Vec<&str> = provinces[1]
        .as_object()
        .map(|o| o.keys().map(String::as_str).collect())
        .unwrap_or_default();
    assert_eq!(
        keys,
        vec![
            "id",
            "name_th",
            "name_en",
            "geography_id",
            "created_at",
            "updated_at",
            "deleted_at"
        ]
    );
    Ok(())
}

#[test]
fn test_failed_validation_writes_nothing() -> anyhow::Result<()> {
    let root = scratch_root()?;
    fs::write(
        root.path().join("data/raw/sub_districts.json"),
        r#"[{"id": 1, "zip_code": "10110", "name_th": "x", "name_en": "x", "district_id": 99}]"#,
    )?;

    let summary = Pipeline::new(PipelineConfig::new(root.path())).run()?;

    assert!(!summary.is_success());
    let messages: Vec<String> = summary
        .report
        .errors()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert!(messages.contains(
        &"[sub_districts] row 1: district_id=99 not found in districts.id".to_string()
    ));
    assert!(!root.path().join("formats").exists());
    assert!(!root.path().join("api").exists());
    Ok(())
}

#[test]
fn test_warnings_gate_only_when_escalated() -> anyhow::Result<()> {
    let root = scratch_root()?;
    fs::write(
        root.path().join("data/raw/geographies.json"),
        r#"[{"id": 1, "name": " ภาคเหนือ"}, {"id": 2, "name": "ภาคกลาง"}]"#,
    )?;

    let strict = Pipeline::new(PipelineConfig::new(root.path()).fail_on_warn(true)).run()?;
    assert!(!strict.is_success());
    assert!(strict.outcome.written.is_empty());

    let lenient = Pipeline::new(PipelineConfig::new(root.path())).run()?;
    assert!(lenient.is_success());
    assert_eq!(lenient.report.warnings().len(), 2);
    Ok(())
}

#[test]
fn test_existing_outputs_skipped_unless_overwrite() -> anyhow::Result<()> {
    let root = scratch_root()?;
    let target = root.path().join("formats/csv/provinces.csv");
    fs::create_dir_all(target.parent().unwrap_or(root.path()))?;
    fs::write(&target, "hand edited")?;

    let config = PipelineConfig::new(root.path()).with_formats(vec![ExportFormat::Csv]);
    let summary = Pipeline::new(config.clone()).export_formats()?;
    assert_eq!(summary.outcome.skipped, vec![target.clone()]);
    assert_eq!(summary.outcome.written.len(), 3);
    assert_eq!(fs::read_to_string(&target)?, "hand edited");
    assert!(summary.to_string().contains("formats/csv/provinces.csv"));

    Pipeline::new(config.overwrite(true)).export_formats()?;
    assert!(fs::read_to_string(&target)?.starts_with("id,name_th,name_en,geography_id"));
    Ok(())
}

#[test]
fn test_runs_are_byte_identical() -> anyhow::Result<()> {
    let first = scratch_root()?;
    let second = scratch_root()?;
    let xlsx_free: Vec<ExportFormat> = ExportFormat::ALL
        .into_iter()
        .filter(|f| *f != ExportFormat::Xlsx)
        .collect();

    for root in [&first, &second] {
        Pipeline::new(PipelineConfig::new(root.path()).with_formats(xlsx_free.clone())).run()?;
    }

    for rel in [
        "formats/csv/sub_districts.csv",
        "formats/json/districts.json",
        "formats/sql/provinces.sql",
        "formats/xml/geographies.xml",
        "api/latest/province_with_district_and_sub_district.json",
    ] {
        assert_eq!(
            fs::read(first.path().join(rel))?,
            fs::read(second.path().join(rel))?,
            "{rel} differs"
        );
    }
    Ok(())
}

#[test]
fn test_compact_json_and_no_ddl() -> anyhow::Result<()> {
    let root = scratch_root()?;
    let config = PipelineConfig::new(root.path())
        .json_indent(0)
        .include_create_table(false)
        .with_formats(vec![ExportFormat::Json, ExportFormat::Sql]);
    Pipeline::new(config).export_formats()?;

    let json = fs::read_to_string(root.path().join("formats/json/geographies.json"))?;
    assert_eq!(json, r#"[{"id":1,"name":"ภาคเหนือ"},{"id":2,"name":"ภาคกลาง"}]"#);

    let sql = fs::read_to_string(root.path().join("formats/sql/geographies.sql"))?;
    assert!(sql.starts_with("INSERT INTO `geographies`"));
    Ok(())
}

#[test]
fn test_unknown_field_with_unusable_xml_name_still_exports() -> anyhow::Result<()> {
    let root = scratch_root()?;
    fs::write(
        root.path().join("data/raw/geographies.json"),
        r#"[{"id": 1, "name": "North", "name en": "x"}, {"id": 2, "name": "Central"}]"#,
    )?;

    let summary = Pipeline::new(
        PipelineConfig::new(root.path()).with_formats(vec![ExportFormat::Xml, ExportFormat::Json]),
    )
    .export_formats()?;

    assert!(summary.is_success(), "{summary}");
    assert_eq!(summary.report.warnings().len(), 1);

    let xml = fs::read_to_string(root.path().join("formats/xml/geographies.xml"))?;
    assert!(xml.contains("<name>North</name>"));
    assert!(!xml.contains("name en"));

    let json = read_json(&root.path().join("formats/json/geographies.json"))?;
    assert_eq!(json[0]["name en"], "x");
    Ok(())
}
