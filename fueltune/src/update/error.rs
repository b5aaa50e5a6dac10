//! Error types for tune updates.

use std::path::PathBuf;

use thiserror::Error;

use crate::tune::TuneError;

/// Result type for tune update operations.
pub type UpdateResult<T> = Result<T, UpdateError>;

/// Errors raised while writing an updated tune.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// The source or template document has no `fuel_base` map.
    #[error("fuel_base map not found in {}", .path.display())]
    MissingFuelMap { path: PathBuf },

    /// Reading, validating, or writing a tune file failed.
    #[error(transparent)]
    Tune(#[from] TuneError),
}
