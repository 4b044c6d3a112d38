/// Structured error types for coinswap-core.
///
/// The CLI wraps these in `anyhow` with context; the server only sees
/// them at startup while loading configuration.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading or writing the config file failed
    #[error("I/O error at {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },

    /// Config file is not valid TOML (or has wrong field types)
    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Rendering the config back to TOML failed
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value is present but unusable
    #[error("Invalid config value for '{key}': {reason}")]
    Invalid { key: String, reason: String },

    /// A required value is absent from file, environment and flags
    #[error("Missing required config value '{key}'")]
    Missing { key: String },
}

/// Result type alias for coinswap-core operations
pub type Result<T> = std::result::Result<T, ConfigError>;

impl ConfigError {
    /// Create an I/O error bound to a path
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid value error
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing value error
    pub fn missing(key: impl Into<String>) -> Self {
        Self::Missing { key: key.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::invalid("session.cookie_name", "must not be empty");
        assert_eq!(
            err.to_string(),
            "Invalid config value for 'session.cookie_name': must not be empty"
        );

        let err = ConfigError::missing("database.url");
        assert!(err.to_string().contains("database.url"));
    }

    #[test]
    fn test_io_error_keeps_path() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = ConfigError::io("/etc/coinswap.toml", io_err);

        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/etc/coinswap.toml"));
    }
}
