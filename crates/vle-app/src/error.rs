//! Error types for the vle-app service layer.

use std::path::PathBuf;
use vle_models::ModelError;
use vle_props::PropsError;

/// Application error type shared by the analysis service and its front ends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read config file: {path}")]
    ConfigFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Failed to read dataset file: {path}")]
    DatasetFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Unknown compound: {0}")]
    UnknownCompound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Property error: {0}")]
    Props(#[from] PropsError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for vle-app operations.
pub type AppResult<T> = Result<T, AppError>;
