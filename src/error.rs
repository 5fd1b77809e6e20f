//! Error handling for tour gross normalization runs.
//!
//! Only run-level failures live here: unreadable input, malformed CSV
//! framing, unwritable output. Row-level problems such as an unparseable
//! gross or a duplicate key are filtering conditions, not errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizerError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input file not found at path: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Invalid CSV input in file: {path} - {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to serialize records for {path}: {source}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl NormalizerError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NormalizerError>;
