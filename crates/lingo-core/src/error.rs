//! Error types for Lingo

use thiserror::Error;

/// The main error type for Lingo operations
#[derive(Debug, Error)]
pub enum LingoError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Corpus error: {0}")]
    CorpusError(String),

    #[error("Manifest error: {0}")]
    ManifestError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Generation error: {0}")]
    GenerationError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Result type alias for Lingo operations
pub type Result<T> = std::result::Result<T, LingoError>;
