//! Error types for audit loading and analysis.

use std::path::PathBuf;

/// Result type for audit operations
pub type AuditResult<T> = Result<T, AuditError>;

/// Error type for audit operations
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// The CSV reader could not read the header or the underlying input.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A column the grouper depends on is not in the header row.
    #[error("Missing required column '{column}' in audit header")]
    MissingColumn { column: String },

    /// Reading an audit or configuration file failed.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed or holds invalid values.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A query was made before any audit file was loaded.
    #[error("No audit dataset loaded")]
    NoDataset,

    /// The requested chart kind does not exist.
    #[error("Unknown chart kind '{0}'")]
    UnknownChart(String),
}

impl AuditError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AuditError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn missing_column(column: impl Into<String>) -> Self {
        AuditError::MissingColumn {
            column: column.into(),
        }
    }

    /// Whether the error was caused by the submitted input rather than the service.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AuditError::Csv(_) | AuditError::MissingColumn { .. } | AuditError::UnknownChart(_)
        )
    }
}
