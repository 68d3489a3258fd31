//! Rendering of the flat format exports and the API views
//!
//! Pure functions of the in-memory tables: nothing here touches the file
//! system. Paths are computed from the layout so the caller can persist the
//! result as one unit.

use geo_adapter_csv::CsvWriter;
use geo_adapter_sql::SqlWriter;
use geo_adapter_xml::XmlWriter;
use geo_hierarchy::{HierarchyBuilder, Notice};
use geo_model::{Catalog, RawTables, Record, TableKind, TableSpec, order_keys};
use tracing::{debug, info};

use crate::format::{ExportFormat, render_json};
use crate::layout::DataLayout;
use crate::output::Artifact;
use crate::{Error, Result};

/// Knobs for the flat format exports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    pub formats: Vec<ExportFormat>,
    pub json_indent: usize,
    pub include_create_table: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            formats: ExportFormat::ALL.to_vec(),
            json_indent: 2,
            include_create_table: true,
        }
    }
}

/// Rendered API files plus the notices raised while nesting
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiArtifacts {
    pub artifacts: Vec<Artifact>,
    pub notices: Vec<Notice>,
}

/// One artifact per table per requested format, tables in catalog order.
///
/// # Errors
///
/// Returns an error if any table fails to render in any format.
pub fn render_format_artifacts(
    catalog: &Catalog,
    tables: &RawTables,
    layout: &DataLayout,
    options: &FormatOptions,
) -> Result<Vec<Artifact>> {
    let mut artifacts = Vec::new();

    for spec in catalog.tables() {
        let records = tables.records(spec.kind);
        let ordered = canonical(spec, &records);
        info!(table = %spec.table_name, rows = records.len(), "Rendering formats");

        for &format in &options.formats {
            let Some(bytes) = render_table(spec, format, &records, &ordered, options)? else {
                continue;
            };
            let path = layout.format_path(format, spec);
            debug!(path = %layout.display(&path), bytes = bytes.len(), "Rendered");
            artifacts.push(Artifact::new(path, bytes));
        }
    }

    Ok(artifacts)
}

fn render_table(
    spec: &TableSpec,
    format: ExportFormat,
    records: &[Record],
    ordered: &[Record],
    options: &FormatOptions,
) -> Result<Option<Vec<u8>>> {
    let bytes = match format {
        ExportFormat::Csv => CsvWriter::new()
            .render(&spec.columns, records)
            .map_err(|e| Error::render(format, e.to_string()))?,
        ExportFormat::Json => render_json(ordered, options.json_indent)?,
        ExportFormat::Sql => SqlWriter::new()
            .include_create_table(options.include_create_table)
            .render(&spec.table_name, &spec.columns, records)
            .map_err(|e| Error::render(format, e.to_string()))?
            .into_bytes(),
        ExportFormat::Xlsx => match render_xlsx(spec, records)? {
            Some(bytes) => bytes,
            None => return Ok(None),
        },
        ExportFormat::Xml => XmlWriter::new()
            .render(&spec.table_name, spec.item_tag(), ordered)
            .map_err(|e| Error::render(format, e.to_string()))?,
    };
    Ok(Some(bytes))
}

#[cfg(feature = "xlsx")]
fn render_xlsx(spec: &TableSpec, records: &[Record]) -> Result<Option<Vec<u8>>> {
    geo_adapter_xlsx::XlsxWriter::new()
        .render(&spec.table_name, &spec.columns, records)
        .map(Some)
        .map_err(|e| Error::render(ExportFormat::Xlsx, e.to_string()))
}

#[cfg(not(feature = "xlsx"))]
fn render_xlsx(spec: &TableSpec, _records: &[Record]) -> Result<Option<Vec<u8>>> {
    tracing::warn!(table = %spec.table_name, "Built without spreadsheet support; skip XLSX");
    Ok(None)
}

/// Flat API files for provinces, districts and sub-districts, then the
/// parent-rooted and child-rooted views.
///
/// # Errors
///
/// Returns an error if the catalog lacks a level of the hierarchy or a
/// document fails to serialize.
pub fn render_api_artifacts(
    catalog: &Catalog,
    tables: &RawTables,
    layout: &DataLayout,
    json_indent: usize,
) -> Result<ApiArtifacts> {
    let province = catalog.require(TableKind::Province)?;
    let district = catalog.require(TableKind::District)?;
    let sub_district = catalog.require(TableKind::SubDistrict)?;

    let provinces = tables.records(TableKind::Province);
    let districts = tables.records(TableKind::District);
    let sub_districts = tables.records(TableKind::SubDistrict);

    let mut output = ApiArtifacts::default();
    for (spec, records) in [
        (province, &provinces),
        (district, &districts),
        (sub_district, &sub_districts),
    ] {
        let bytes = render_json(&canonical(spec, records), json_indent)?;
        output
            .artifacts
            .push(Artifact::new(layout.api_path(&spec.entity_name), bytes));
    }

    let builder = HierarchyBuilder::new(catalog)?;

    let parent_rooted = builder.build_parent_rooted(&provinces, &districts, &sub_districts);
    let name = format!(
        "{}_with_{}_and_{}",
        province.entity_name, district.entity_name, sub_district.entity_name
    );
    output.artifacts.push(Artifact::new(
        layout.api_path(&name),
        render_json(&parent_rooted, json_indent)?,
    ));

    let child_rooted = builder.build_child_rooted(&sub_districts, &districts, &provinces);
    let name = format!(
        "{}_with_{}_and_{}",
        sub_district.entity_name, district.entity_name, province.entity_name
    );
    output.artifacts.push(Artifact::new(
        layout.api_path(&name),
        render_json(&child_rooted.records, json_indent)?,
    ));
    output.notices = child_rooted.notices;

    info!(
        files = output.artifacts.len(),
        notices = output.notices.len(),
        "Rendered API"
    );
    Ok(output)
}

fn canonical(spec: &TableSpec, records: &[Record]) -> Vec<Record> {
    records
        .iter()
        .map(|record| order_keys(record, &spec.columns))
        .collect()
}
