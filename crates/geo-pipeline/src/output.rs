//! Staged artifacts and their persistence
//!
//! Every output of a run is rendered into an [`Artifact`] first. Only when
//! all of them exist in memory does [`OutputWriter::persist`] touch the
//! file system, writing each through a sibling temporary file that is then
//! renamed over the destination.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::{Error, Result};

/// One fully rendered output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            bytes: bytes.into(),
        }
    }
}

/// Which artifacts were written and which were left alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteOutcome {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

impl WriteOutcome {
    pub fn merge(&mut self, other: WriteOutcome) {
        self.written.extend(other.written);
        self.skipped.extend(other.skipped);
    }
}

/// Persists staged artifacts under the overwrite policy
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputWriter {
    overwrite: bool,
}

impl OutputWriter {
    pub fn new(overwrite: bool) -> Self {
        Self { overwrite }
    }

    /// Write every artifact whose destination is free, or all of them when
    /// overwriting. Existing destinations are otherwise skipped with a
    /// warning and left byte-for-byte untouched.
    ///
    /// # Errors
    ///
    /// Returns an error when a directory cannot be created or a file cannot
    /// be written or renamed into place.
    pub fn persist(&self, artifacts: &[Artifact]) -> Result<WriteOutcome> {
        let mut outcome = WriteOutcome::default();

        let (to_write, to_skip): (Vec<&Artifact>, Vec<&Artifact>) = artifacts
            .iter()
            .partition(|artifact| self.overwrite || !artifact.path.exists());

        for artifact in to_skip {
            warn!(path = %artifact.path.display(), "Exists (skip). Use --overwrite to replace");
            outcome.skipped.push(artifact.path.clone());
        }

        for artifact in to_write {
            write_atomic(&artifact.path, &artifact.bytes)?;
            info!(path = %artifact.path.display(), bytes = artifact.bytes.len(), "Wrote");
            outcome.written.push(artifact.path.clone());
        }

        Ok(outcome)
    }
}

/// Write `bytes` to a temporary file beside `path`, then rename it over
/// `path`. A failure leaves `path` as it was.
///
/// # Errors
///
/// Returns an error when any step of the write fails.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let display = path.display().to_string();
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    fs::create_dir_all(dir).map_err(|e| Error::io("create directory", dir.display().to_string(), e.to_string()))?;

    let mut tmp = NamedTempFile::new_in(dir)
        .map_err(|e| Error::io("create temporary file", &display, e.to_string()))?;
    tmp.write_all(bytes)
        .map_err(|e| Error::io("write", &display, e.to_string()))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| Error::io("sync", &display, e.to_string()))?;
    tmp.persist(path)
        .map_err(|e| Error::io("rename into place", &display, e.error.to_string()))?;
    Ok(())
}
