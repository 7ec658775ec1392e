//! Error types for preference handling.
//!
//! Only [`ThemeError`] ever reaches callers of the high-level API. The other
//! errors are produced by the capability traits and the parsers, and the
//! store, resolver and provider absorb them into defaults.

use std::io;
use std::path::PathBuf;

/// Errors surfaced by the provider, configuration loading and script rendering.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    /// A consumer asked for the theme context outside a mounted provider.
    #[error("theme context used outside of a mounted ThemeProvider")]
    MissingProvider,

    /// Configuration could not be parsed.
    #[error("invalid theme configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    /// Configuration file could not be read.
    #[error("failed to read theme configuration {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The preboot script template failed to render.
    #[error("failed to render preboot script: {0}")]
    Template(#[from] minijinja::Error),
}

/// Failure of the persistent key-value medium.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Storage is disabled or does not exist in this host.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Reading or writing the backing file failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The backing data exists but cannot be decoded.
    #[error("storage contents are corrupt: {0}")]
    Corrupt(String),
}

impl StorageError {
    /// Create an unavailable error.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

/// Failure of the OS appearance query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    /// The host has no way to answer the query.
    #[error("appearance query unsupported: {0}")]
    Unsupported(String),

    /// The query exists but failed.
    #[error("appearance query failed: {0}")]
    Failed(String),
}

/// A string that is not one of the accent tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown accent '{0}'")]
pub struct ParseAccentError(pub String);

/// A string that is not one of the mode tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mode '{0}'")]
pub struct ParseModeError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ThemeError::MissingProvider;
        assert!(err.to_string().contains("outside of a mounted ThemeProvider"));

        let err = ParseAccentError("teal".to_string());
        assert_eq!(err.to_string(), "unknown accent 'teal'");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: StorageError = io_err.into();
        assert!(matches!(err, StorageError::Io(_)));
    }

    #[test]
    fn test_config_io_names_path() {
        let err = ThemeError::ConfigIo {
            path: PathBuf::from("/etc/tint.yaml"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("/etc/tint.yaml"));
    }
}
