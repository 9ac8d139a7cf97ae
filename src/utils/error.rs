//! Error handling for Rustuploader

use thiserror::Error;

use crate::tag_processing::TagProcessingError;

/// Main error type for Rustuploader
#[derive(Debug, Error)]
pub enum UploaderError {
    #[error("Tag processing failed: {0}")]
    TagProcessing(#[from] TagProcessingError),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("YouTube API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Access token has expired or been revoked")]
    TokenExpired,

    #[error("Invalid preset: {0}")]
    InvalidPreset(String),

    #[error("Preset not found: {0}")]
    PresetNotFound(String),

    #[error("Unknown visibility status: {0}")]
    UnknownVisibility(String),
}

pub type Result<T> = std::result::Result<T, UploaderError>;
