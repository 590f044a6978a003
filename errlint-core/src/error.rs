//! Typed error handling for errlint.
//!
//! Provides structured errors that library consumers can match on,
//! with full context about what went wrong and where.
//!
//! Syntax errors in scanned sources are deliberately not represented
//! here: the frontend logs and skips files that do not parse instead of
//! failing the run.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for errlint operations.
///
/// This provides typed errors that library consumers can match on,
/// unlike opaque `anyhow::Error` types.
#[derive(Error, Debug)]
pub enum ErrlintError {
    /// I/O error when reading files
    #[error("I/O error at {path}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration file errors
    #[error("Config error at {path}: {message}")]
    Config { path: PathBuf, message: String },
}

impl ErrlintError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Convenience type alias for errlint results.
pub type ErrlintResult<T> = Result<T, ErrlintError>;

/// Extension trait for converting std::io::Error with path context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    fn with_path(self, path: impl Into<PathBuf>) -> ErrlintResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> ErrlintResult<T> {
        self.map_err(|e| ErrlintError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error() {
        let err = ErrlintError::io(
            PathBuf::from("/test/codes.rs"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        );
        assert!(matches!(err, ErrlintError::Io { .. }));
        assert!(err.to_string().contains("/test/codes.rs"));
    }

    #[test]
    fn test_config_error() {
        let err = ErrlintError::config("/proj/errlint.toml", "unknown key");
        assert!(matches!(err, ErrlintError::Config { .. }));
        assert!(err.to_string().contains("errlint.toml"));
        assert!(err.to_string().contains("unknown key"));
    }

    #[test]
    fn test_io_result_ext() {
        let result: std::io::Result<()> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        let errlint_result = result.with_path("/missing/codes.rs");
        assert!(errlint_result.is_err());
    }
}
