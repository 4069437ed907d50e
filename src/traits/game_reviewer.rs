use async_trait::async_trait;

use crate::errors::GameGenResult;
use crate::models::review::ReviewResult;

/// Trait for judging generated game code against its description
#[async_trait]
pub trait GameReviewer: Send + Sync {
    /// Review `code` against the `description` it was generated from.
    ///
    /// The pass/fail decision is the model's; malformed output is
    /// `GameGenError::ReviewFailed`.
    async fn review(&self, description: &str, code: &str) -> GameGenResult<ReviewResult>;
}
