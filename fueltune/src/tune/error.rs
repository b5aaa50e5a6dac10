//! Error types for tune file loading and validation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::MapId;

/// Result type for tune file operations.
pub type TuneResult<T> = Result<T, TuneError>;

/// Errors raised while reading, validating, or writing a tune file.
///
/// Everything except the I/O variants is a structural validation failure and
/// names the map that caused it.
#[derive(Debug, Error)]
pub enum TuneError {
    /// Failed to read the tune file.
    #[error("failed to read tune file {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    /// Failed to write the tune file.
    #[error("failed to write tune file {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    /// The file is not valid JSON.
    #[error("failed to parse tune file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The document could not be serialized.
    #[error("failed to serialize tune file: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The document is JSON but not a tune file.
    #[error("invalid tune file structure: {0}")]
    InvalidStructure(String),

    /// A required map is absent.
    #[error("required map '{id}' not found in tune file")]
    MissingMap { id: MapId },

    /// A map has no numeric rows.
    #[error("map '{id}' contains no numeric data")]
    EmptyMap { id: MapId },

    /// A map's `data` field is not an array of row strings.
    #[error("map '{id}' data must be an array of comma-separated row strings")]
    MalformedData { id: String },

    /// A row item is not a finite number.
    #[error("map '{id}' row {row}: invalid number '{value}'")]
    InvalidNumber {
        id: String,
        row: usize,
        value: String,
    },

    /// A 2-D table does not match its axes.
    #[error(
        "{id} shape mismatch: ({actual_rows}, {actual_cols}) vs expected ({expected_rows}, {expected_cols})"
    )]
    ShapeMismatch {
        id: MapId,
        actual_rows: usize,
        actual_cols: usize,
        expected_rows: usize,
        expected_cols: usize,
    },

    /// A 1-D vector does not match the axis it is indexed by.
    #[error("{id} length mismatch: {actual} vs {expected} ({axis})")]
    LengthMismatch {
        id: MapId,
        axis: MapId,
        actual: usize,
        expected: usize,
    },

    /// An axis has a breakpoint that is not greater than the previous one.
    #[error("axis '{id}' is not strictly ascending at position {index}")]
    NotAscending { id: MapId, index: usize },
}
