//! Configuration error types

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading or publishing configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing a configuration file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        /// The file involved
        path: PathBuf,
        /// The underlying error
        #[source]
        source: io::Error,
    },

    /// A configuration file is not valid JSON
    #[error("Failed to parse {path}: {source}")]
    Parse {
        /// The file involved
        path: PathBuf,
        /// The underlying error
        #[source]
        source: serde_json::Error,
    },

    /// A key holds a value of the wrong shape
    #[error("Invalid value for {key}: {message}")]
    InvalidValue {
        /// The dotted key that was read
        key: String,
        /// Why the value was rejected
        message: String,
    },
}

impl ConfigError {
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn parse(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// A specialized Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
