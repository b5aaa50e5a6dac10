//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist.
    #[error("config file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// The file could not be read or is not valid INI.
    #[error("failed to load config file {}: {source}", .path.display())]
    Load { path: PathBuf, source: ini::Error },

    /// A key is not recognized in its section.
    #[error("unknown key '{key}' in [{section}]")]
    UnknownKey { section: String, key: String },

    /// A value could not be parsed or is out of range.
    #[error("invalid value '{value}' for {section}.{key}: {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_message() {
        let err = ConfigError::InvalidValue {
            section: "analysis".into(),
            key: "change_limit".into(),
            value: "-3".into(),
            reason: "must be a non-negative number",
        };
        assert_eq!(
            err.to_string(),
            "invalid value '-3' for analysis.change_limit: must be a non-negative number"
        );
    }
}
