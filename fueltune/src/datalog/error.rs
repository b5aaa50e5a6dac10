//! Error types for datalog ingestion.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for datalog operations.
pub type DatalogResult<T> = Result<T, DatalogError>;

/// Errors raised while reading datalogs.
#[derive(Debug, Error)]
pub enum DatalogError {
    /// No datalog paths were given.
    #[error("no datalogs were supplied")]
    NoDatalogs,

    /// The datalog could not be opened or its header row read.
    #[error("failed to open datalog {}: {source}", .path.display())]
    Open { path: PathBuf, source: csv::Error },

    /// Required columns are absent from the header row.
    #[error(
        "missing columns [{}] in datalog {}",
        .columns.join(", "),
        .path.display()
    )]
    MissingColumns { path: PathBuf, columns: Vec<String> },

    /// A data row could not be read.
    #[error("failed to read datalog {} at line {line}: {source}", .path.display())]
    Record {
        path: PathBuf,
        line: usize,
        source: csv::Error,
    },
}
