//! Unified error types for the touchmap engine.
//!
//! Everything here is recoverable at the batch level: ingestion converts
//! these into human-readable warnings and keeps going, so one bad export
//! never sinks a whole upload.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the touchmap engine.
#[derive(Debug, Error)]
pub enum Error {
    /// File name does not match the exporter's naming convention.
    #[error("unrecognized filename: {0:?}")]
    UnrecognizedFilename(String),

    /// File content could not be parsed as tabular data.
    #[error("unreadable table {name:?}: {reason}")]
    UnreadableTable { name: String, reason: String },

    /// A required column is absent from a dataset table.
    #[error("{table:?} table is missing column {column:?}")]
    MissingColumn { table: String, column: String },

    /// A single row failed typed parsing; callers skip the row.
    #[error("row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    /// Requested game is not present in the session.
    #[error("unknown game: {0:?}")]
    UnknownGame(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    pub fn unrecognized_filename(name: impl Into<String>) -> Self {
        Self::UnrecognizedFilename(name.into())
    }

    pub fn unreadable_table(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnreadableTable {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn missing_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            table: table.into(),
            column: column.into(),
        }
    }

    pub fn malformed_row(row: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRow {
            row,
            reason: reason.into(),
        }
    }
}
