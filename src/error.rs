//! Error types for compartment export.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by every stage of the export pipeline.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Credential error: {0}")]
    CredentialError(String),

    #[error("Failed to load private key {path}: {message}")]
    KeyLoadError { path: PathBuf, message: String },

    #[error("Failed to sign request: {0}")]
    SigningError(String),

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Identity API returned {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Failed to decode compartment listing: {0}")]
    Decode(String),

    #[error("Compartment not found: {0}")]
    UnknownCompartment(String),

    #[error("Parent cycle detected at compartment {0}")]
    CycleDetected(String),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl ApiError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ApiError::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap a CSV error with the output path.
    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        ApiError::Csv {
            path: path.into(),
            source,
        }
    }
}
