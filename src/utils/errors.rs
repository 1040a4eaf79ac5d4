use thiserror::Error;

/// Main error type for Morning Pod
#[derive(Error, Debug)]
pub enum MorningPodError {
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Invalid priority '{0}' (expected cost, quality or speed)")]
    InvalidPriority(String),

    #[error("Invalid model kind '{0}' (expected summarization or tts)")]
    InvalidModelKind(String),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, MorningPodError>;
