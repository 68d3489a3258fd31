//! Error types for CSV adapter with context

use thiserror::Error;

/// Errors that can occur when writing CSV
#[derive(Error, Debug, Clone)]
pub enum CsvError {
    /// CSV write error with the row it happened on (0 = header)
    #[error("CSV write error at row {row}: {message}")]
    Write { row: usize, message: String },

    /// I/O error
    #[error("IO error: {0}")]
    Io(String),
}

impl CsvError {
    /// Create a write error at a specific row
    pub fn write_at(row: usize, message: impl Into<String>) -> Self {
        Self::Write {
            row,
            message: message.into(),
        }
    }

    /// Get the row number if available
    pub fn row_number(&self) -> Option<usize> {
        match self {
            Self::Write { row, .. } => Some(*row),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CsvError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

/// Result type alias for CSV operations
pub type CsvResult<T> = std::result::Result<T, CsvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_error_display() {
        let err = CsvError::write_at(3, "boom");
        assert_eq!(err.to_string(), "CSV write error at row 3: boom");
        assert_eq!(err.row_number(), Some(3));
    }

    #[test]
    fn test_io_conversion() {
        let err: CsvError = std::io::Error::other("disk full").into();
        assert!(matches!(err, CsvError::Io(_)));
        assert_eq!(err.row_number(), None);
    }
}
