//! Unified error types for the normalization engine.

use std::path::PathBuf;

/// Main error type for normalization operations.
#[derive(Debug, thiserror::Error)]
pub enum NormError {
    /// A dictionary resource could not be read or parsed.
    #[error("dictionary load failed for {path}: {reason}")]
    DictionaryLoad { path: PathBuf, reason: String },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid input provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience type alias for Results with NormError.
pub type NormResult<T> = Result<T, NormError>;

impl NormError {
    /// Create a dictionary load error for the given resource.
    pub fn dictionary_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::DictionaryLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a config error with message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error with message.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a serialization error with message.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}
