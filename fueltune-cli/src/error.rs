//! CLI error type.

use std::io;
use std::path::PathBuf;

use fueltune::config::ConfigError;
use fueltune::datalog::DatalogError;
use fueltune::tune::TuneError;
use fueltune::update::UpdateError;
use thiserror::Error;

/// Errors surfaced to the user by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid combination or value of command line arguments.
    #[error("{0}")]
    Config(String),

    #[error(transparent)]
    ConfigFile(#[from] ConfigError),

    #[error(transparent)]
    Tune(#[from] TuneError),

    #[error(transparent)]
    Datalog(#[from] DatalogError),

    #[error(transparent)]
    Update(#[from] UpdateError),

    /// The Markdown summary could not be written.
    #[error("failed to write summary {}: {source}", .path.display())]
    Report { path: PathBuf, source: io::Error },
}
