use schemars::JsonSchema;
use serde::{ Deserialize, Serialize };

/// Structured output of the generation stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GenerationResult {
    /// Explain your reasoning
    pub reasoning: String,

    /// The html5 code for the game
    pub code: String,

    /// Instruction how to play the game
    pub instructions: String,
}

impl GenerationResult {
    /// A result with blank code carries nothing worth reviewing
    pub fn has_code(&self) -> bool {
        !self.code.trim().is_empty()
    }
}
