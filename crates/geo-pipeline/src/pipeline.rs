//! Pipeline orchestration
//!
//! A run is a fixed sequence of stages. Validation always comes first and
//! its verdict gates the rest: on failure nothing is rendered or written.
//! Export stages render into memory, and only when every requested stage
//! has rendered successfully are the artifacts persisted.

use std::fmt;
use std::path::PathBuf;

use geo_hierarchy::Notice;
use geo_model::Catalog;
use geo_validation::{IssueKind, ValidationReport, Verdict, validate_dataset};
use tracing::{error, info, warn};

use crate::exports::{FormatOptions, render_api_artifacts, render_format_artifacts};
use crate::format::ExportFormat;
use crate::layout::DataLayout;
use crate::loader::load_dataset;
use crate::output::{OutputWriter, WriteOutcome};
use crate::{Error, Result};

/// Configuration for a pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Data root holding `data/raw` and `data/spec`
    pub root: PathBuf,
    /// Treat warnings as failures
    pub fail_on_warn: bool,
    /// Replace existing output files instead of skipping them
    pub overwrite: bool,
    /// Spaces per JSON indent level; 0 writes compact JSON
    pub json_indent: usize,
    /// Prepend `CREATE TABLE` to SQL exports
    pub include_create_table: bool,
    pub formats: Vec<ExportFormat>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            fail_on_warn: false,
            overwrite: false,
            json_indent: 2,
            include_create_table: true,
            formats: ExportFormat::ALL.to_vec(),
        }
    }
}

impl PipelineConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn fail_on_warn(mut self, enabled: bool) -> Self {
        self.fail_on_warn = enabled;
        self
    }

    #[must_use]
    pub fn overwrite(mut self, enabled: bool) -> Self {
        self.overwrite = enabled;
        self
    }

    #[must_use]
    pub fn json_indent(mut self, indent: usize) -> Self {
        self.json_indent = indent;
        self
    }

    #[must_use]
    pub fn include_create_table(mut self, enabled: bool) -> Self {
        self.include_create_table = enabled;
        self
    }

    #[must_use]
    pub fn with_formats(mut self, formats: Vec<ExportFormat>) -> Self {
        self.formats = formats;
        self
    }

    fn format_options(&self) -> FormatOptions {
        FormatOptions {
            formats: self.formats.clone(),
            json_indent: self.json_indent,
            include_create_table: self.include_create_table,
        }
    }
}

/// A step of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Validate,
    ExportFormats,
    ExportApi,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Validate => "validate",
            Stage::ExportFormats => "export-formats",
            Stage::ExportApi => "export-api",
        })
    }
}

/// What a run found and did
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Stages that ran to completion, in order
    pub completed: Vec<Stage>,
    pub report: ValidationReport,
    pub verdict: Verdict,
    pub outcome: WriteOutcome,
    /// Embeds the child-rooted view could not resolve
    pub notices: Vec<Notice>,
    layout: DataLayout,
}

impl RunSummary {
    fn new(layout: DataLayout, report: ValidationReport, verdict: Verdict) -> Self {
        Self {
            completed: Vec::new(),
            report,
            verdict,
            outcome: WriteOutcome::default(),
            notices: Vec::new(),
            layout,
        }
    }

    pub fn is_success(&self) -> bool {
        self.verdict.is_pass()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.report)?;

        if !self.outcome.written.is_empty() {
            writeln!(f, "Written: {}", self.outcome.written.len())?;
        }
        if !self.outcome.skipped.is_empty() {
            writeln!(f, "Skipped (already exist): {}", self.outcome.skipped.len())?;
            for path in &self.outcome.skipped {
                writeln!(f, "  - {}", self.layout.display(path))?;
            }
        }

        if self.is_success() {
            write!(f, "OK")
        } else {
            write!(f, "FAILED")
        }
    }
}

/// Validate-then-export pipeline over one data root
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    catalog: Catalog,
    layout: DataLayout,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let layout = DataLayout::new(config.root.clone());
        Self {
            config,
            catalog: Catalog::default(),
            layout,
        }
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn layout(&self) -> &DataLayout {
        &self.layout
    }

    /// Validate only.
    ///
    /// # Errors
    ///
    /// Returns an error if the data root is not a directory.
    pub fn validate(&self) -> Result<RunSummary> {
        self.execute(&[Stage::Validate])
    }

    /// Validate, then write the per-table format exports.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or writing fails.
    pub fn export_formats(&self) -> Result<RunSummary> {
        self.execute(&[Stage::Validate, Stage::ExportFormats])
    }

    /// Validate, then write the API files.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or writing fails.
    pub fn export_api(&self) -> Result<RunSummary> {
        self.execute(&[Stage::Validate, Stage::ExportApi])
    }

    /// Validate, export formats, export API.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or writing fails.
    pub fn run(&self) -> Result<RunSummary> {
        self.execute(&[Stage::Validate, Stage::ExportFormats, Stage::ExportApi])
    }

    fn execute(&self, stages: &[Stage]) -> Result<RunSummary> {
        let root = self.layout.root();
        if !root.is_dir() {
            return Err(Error::pipeline(
                "load",
                root.display().to_string(),
                "data root is not a directory",
            ));
        }

        let dataset = load_dataset(&self.layout, &self.catalog);
        let mut report = dataset.report;
        report.merge(validate_dataset(&self.catalog, &dataset.tables, &dataset.schemas));

        let verdict = report.verdict(self.config.fail_on_warn);
        info!(
            errors = report.errors().len(),
            warnings = report.warnings().len(),
            "Validation finished"
        );

        let mut summary = RunSummary::new(self.layout.clone(), report, verdict);
        if !verdict.is_pass() {
            error!("Validation failed; no outputs written");
            return Ok(summary);
        }
        summary.completed.push(Stage::Validate);

        let mut artifacts = Vec::new();
        let mut rendered = Vec::new();
        for &stage in stages {
            match stage {
                Stage::Validate => {}
                Stage::ExportFormats => {
                    artifacts.extend(render_format_artifacts(
                        &self.catalog,
                        &dataset.tables,
                        &self.layout,
                        &self.config.format_options(),
                    )?);
                    rendered.push(stage);
                }
                Stage::ExportApi => {
                    let api = render_api_artifacts(
                        &self.catalog,
                        &dataset.tables,
                        &self.layout,
                        self.config.json_indent,
                    )?;
                    for notice in &api.notices {
                        summary
                            .report
                            .warn(IssueKind::UnresolvedEmbed, "", notice.to_string());
                    }
                    summary.notices.extend(api.notices);
                    artifacts.extend(api.artifacts);
                    rendered.push(stage);
                }
            }
        }

        if artifacts.is_empty() {
            return Ok(summary);
        }

        summary.outcome = OutputWriter::new(self.config.overwrite).persist(&artifacts)?;
        summary.completed.extend(rendered);

        if !summary.outcome.skipped.is_empty() {
            warn!(
                skipped = summary.outcome.skipped.len(),
                "Some outputs already existed and were left untouched"
            );
        }
        Ok(summary)
    }
}
