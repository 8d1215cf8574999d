//! Error types for vidask.

use thiserror::Error;

/// Library-level error type for vidask operations.
#[derive(Error, Debug)]
pub enum VidaskError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No transcript available for video {0}")]
    NoTranscript(String),

    #[error("Transcripts are disabled for video {0}")]
    TranscriptsDisabled(String),

    #[error("Video {0} is unavailable (private, deleted, or restricted)")]
    VideoUnavailable(String),

    #[error("Transcript is no longer available: {0}")]
    TranscriptUnavailable(String),

    #[error("Transcript for video {0} is empty")]
    EmptyTranscript(String),

    #[error("Captions service error: {0}")]
    Captions(String),

    #[error("Translation failed: {0}")]
    TranslationFailed(String),

    #[error("Answer generation failed: {0}")]
    AnswerGenerationFailed(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Vector store error: {0}")]
    VectorStore(String),

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

/// Result type alias for vidask operations.
pub type Result<T> = std::result::Result<T, VidaskError>;
