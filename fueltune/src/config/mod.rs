//! Configuration.
//!
//! Run settings come from three places, highest precedence first: command
//! line flags, the INI file (`~/.fueltune/config.ini` unless another path is
//! given), and the built-in defaults in [`AnalysisConfig`] and
//! [`ColumnMapping`](crate::datalog::ColumnMapping).

mod error;
mod file;
mod settings;

pub use error::{ConfigError, ConfigResult};
pub use file::{config_file_path, ConfigFile};
pub use settings::{AnalysisConfig, DEFAULT_CHANGE_LIMIT_PCT, DEFAULT_MIN_SAMPLES};
