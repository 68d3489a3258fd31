//! Where inputs are read from and outputs written to, relative to a root

use std::path::{Path, PathBuf};

use geo_model::TableSpec;

use crate::format::ExportFormat;

/// Paths of every input and output under one data root.
///
/// ```text
/// <root>/data/raw/<table>.json
/// <root>/data/spec/<entity>.json
/// <root>/formats/<format>/<table>.<ext>
/// <root>/api/latest/<name>.json
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    root: PathBuf,
}

impl DataLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn raw_dir(&self) -> PathBuf {
        self.root.join("data").join("raw")
    }

    pub fn spec_dir(&self) -> PathBuf {
        self.root.join("data").join("spec")
    }

    pub fn raw_path(&self, spec: &TableSpec) -> PathBuf {
        self.raw_dir().join(spec.raw_file_name())
    }

    pub fn format_dir(&self, format: ExportFormat) -> PathBuf {
        self.root.join("formats").join(format.extension())
    }

    pub fn format_path(&self, format: ExportFormat, spec: &TableSpec) -> PathBuf {
        self.format_dir(format)
            .join(format!("{}.{}", spec.table_name, format.extension()))
    }

    pub fn api_dir(&self) -> PathBuf {
        self.root.join("api").join("latest")
    }

    pub fn api_path(&self, name: &str) -> PathBuf {
        self.api_dir().join(format!("{name}.json"))
    }

    /// `path` relative to the root, `/`-separated, for messages.
    pub fn display(&self, path: &Path) -> String {
        match path.strip_prefix(&self.root) {
            Ok(relative) => relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/"),
            Err(_) => path.display().to_string(),
        }
    }
}
