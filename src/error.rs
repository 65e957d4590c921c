//! Custom error types for tasktrack.
//!
//! Storage failures are fatal to the invoking command; out-of-range
//! positions are not errors at all (see [`crate::repo::Outcome`]).

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tasktrack operations.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Underlying SQLite failure (permissions, corruption, bad schema).
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Failed to load or parse configuration
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// IO error wrapper
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TrackerError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            path: None,
        }
    }

    /// Create a configuration error with path
    pub fn config_with_path(message: impl Into<String>, path: PathBuf) -> Self {
        Self::Config {
            message: message.into(),
            path: Some(path),
        }
    }

    /// Get error code for exit status
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => 7,
            _ => 1,
        }
    }
}

/// Type alias for tasktrack results
pub type Result<T> = std::result::Result<T, TrackerError>;
