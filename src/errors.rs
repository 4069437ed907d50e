use thiserror::Error;

use crate::implementations::config::ConfigError;
use crate::implementations::llm_client::LlmError;

/// Custom error types for the gameforge pipeline
#[derive(Debug, Error)]
pub enum GameGenError {
    #[error("Game generation failed: {0}")]
    GenerationFailed(String),

    #[error("Game review failed: {0}")]
    ReviewFailed(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Model call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Structured output error: {0}")]
    StructuredOutput(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

/// Result type specific to gameforge operations
pub type GameGenResult<T> = Result<T, GameGenError>;
