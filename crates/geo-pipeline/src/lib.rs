#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # geo-pipeline
//!
//! Validate-then-export orchestration over the raw administrative tables.
//!
//! A run loads every raw table and schema under a data root, validates the
//! whole dataset, and only on a passing verdict renders the requested
//! outputs. All outputs are rendered in memory before the first file is
//! written, so a rendering failure leaves the output tree untouched.
//!
//! ```no_run
//! use geo_pipeline::{Pipeline, PipelineConfig};
//!
//! let summary = Pipeline::new(PipelineConfig::new(".").overwrite(true)).run()?;
//! println!("{summary}");
//! # Ok::<(), geo_pipeline::Error>(())
//! ```

pub mod exports;
pub mod format;
pub mod layout;
pub mod loader;
pub mod output;
pub mod pipeline;

pub use exports::{ApiArtifacts, FormatOptions, render_api_artifacts, render_format_artifacts};
pub use format::{ExportFormat, render_json};
pub use layout::DataLayout;
pub use loader::{LoadedDataset, load_dataset};
pub use output::{Artifact, OutputWriter, WriteOutcome, write_atomic};
pub use pipeline::{Pipeline, PipelineConfig, RunSummary, Stage};

use std::fmt;

use thiserror::Error;

/// Errors that stop a pipeline run
#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("Pipeline error during {operation} for '{path}': {message}")]
    Pipeline {
        operation: String,
        path: String,
        message: String,
    },

    #[error("Failed to render {format}: {message}")]
    Render { format: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error during {operation} for '{path}': {message}")]
    Io {
        operation: String,
        path: String,
        message: String,
    },
}

impl Error {
    /// Create a structured pipeline error with operation/path context.
    pub fn pipeline(
        operation: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Pipeline {
            operation: operation.into(),
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a structured I/O error with operation/path context.
    pub fn io(
        operation: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Io {
            operation: operation.into(),
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn render(format: impl fmt::Display, message: impl Into<String>) -> Self {
        Self::Render {
            format: format.to_string(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::io("io", "<unknown>", e.to_string())
    }
}

impl From<geo_model::Error> for Error {
    fn from(e: geo_model::Error) -> Self {
        Error::config(e.to_string())
    }
}

impl From<geo_hierarchy::Error> for Error {
    fn from(e: geo_hierarchy::Error) -> Self {
        Error::config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
