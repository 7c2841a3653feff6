//! Error types for Recap.

use thiserror::Error;

/// Library-level error type for Recap operations.
#[derive(Error, Debug)]
pub enum RecapError {
    #[error("Invalid video reference: {0}")]
    InvalidReference(String),

    #[error("Transcript unavailable: {0}")]
    TranscriptUnavailable(String),

    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    #[error("Translation failed: {0}")]
    TranslationFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Coarse classification of failures, used by callers to pick a recovery path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The URL could not be turned into a video identifier.
    InvalidReference,
    /// No transcript exists for the video.
    TranscriptUnavailable,
    /// The generation service returned an error.
    GenerationFailed,
    /// The translation service failed after all retries.
    TranslationFailed,
    /// Configuration, IO and transport errors.
    Other,
}

impl RecapError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RecapError::InvalidReference(_) => ErrorKind::InvalidReference,
            RecapError::TranscriptUnavailable(_) => ErrorKind::TranscriptUnavailable,
            RecapError::GenerationFailed(_) | RecapError::OpenAI(_) => ErrorKind::GenerationFailed,
            RecapError::TranslationFailed(_) => ErrorKind::TranslationFailed,
            _ => ErrorKind::Other,
        }
    }
}

/// Result type alias for Recap operations.
pub type Result<T> = std::result::Result<T, RecapError>;
