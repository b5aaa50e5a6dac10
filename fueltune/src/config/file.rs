//! INI configuration file.
//!
//! ```ini
//! [analysis]
//! min_samples = 8
//! change_limit = 3.0
//!
//! [columns]
//! load = Load (g/rev)
//! throttle = Accelerator Position (%)
//! ```
//!
//! Every key is optional. `[columns]` keys are the field names from
//! [`Field::key`]. Unknown sections are ignored; unknown keys inside the
//! known sections are rejected.

use std::path::{Path, PathBuf};

use ini::Ini;

use super::{AnalysisConfig, ConfigError, ConfigResult};
use crate::datalog::{ColumnMapping, Field};

const ANALYSIS_SECTION: &str = "analysis";
const COLUMNS_SECTION: &str = "columns";

/// Default configuration file location: `~/.fueltune/config.ini`.
pub fn config_file_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".fueltune").join("config.ini"))
}

/// Settings read from a configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub analysis: AnalysisConfig,
    pub columns: ColumnMapping,
}

impl ConfigFile {
    /// Load the file at the default location, or defaults if there is none.
    pub fn load() -> ConfigResult<Self> {
        match config_file_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load an explicitly named file. A missing file is an error.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let ini = Ini::load_from_file(path).map_err(|source| ConfigError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ini(&ini)?;

        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Build settings from parsed INI, starting from defaults.
    pub fn from_ini(ini: &Ini) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(section) = ini.section(Some(ANALYSIS_SECTION)) {
            for (key, value) in section.iter() {
                match key {
                    "min_samples" => {
                        config.analysis.min_samples = value.trim().parse().map_err(|_| {
                            invalid(ANALYSIS_SECTION, key, value, "must be a non-negative integer")
                        })?;
                    }
                    "change_limit" => {
                        config.analysis.change_limit_pct = parse_limit(value)
                            .ok_or_else(|| {
                                invalid(ANALYSIS_SECTION, key, value, "must be a non-negative number")
                            })?;
                    }
                    _ => return Err(unknown(ANALYSIS_SECTION, key)),
                }
            }
        }

        if let Some(section) = ini.section(Some(COLUMNS_SECTION)) {
            for (key, value) in section.iter() {
                let field = Field::from_key(key).ok_or_else(|| unknown(COLUMNS_SECTION, key))?;
                let header = value.trim();
                if header.is_empty() {
                    return Err(invalid(COLUMNS_SECTION, key, value, "must not be empty"));
                }
                config.columns = config.columns.with_header(field, header);
            }
        }

        Ok(config)
    }
}

fn parse_limit(value: &str) -> Option<f64> {
    let limit: f64 = value.trim().parse().ok()?;
    (limit.is_finite() && limit >= 0.0).then_some(limit)
}

fn invalid(section: &str, key: &str, value: &str, reason: &'static str) -> ConfigError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason,
    }
}

fn unknown(section: &str, key: &str) -> ConfigError {
    ConfigError::UnknownKey {
        section: section.to_string(),
        key: key.to_string(),
    }
}
