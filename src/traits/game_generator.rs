use async_trait::async_trait;

use crate::errors::GameGenResult;
use crate::models::generation::GenerationResult;

/// Trait for turning a free-text game description into game code
#[async_trait]
pub trait GameGenerator: Send + Sync {
    /// Generate a single-file HTML5 game.
    ///
    /// Any absent or malformed model output is returned as
    /// `GameGenError::GenerationFailed`; there is no retry or repair.
    async fn generate(&self, description: &str) -> GameGenResult<GenerationResult>;
}
