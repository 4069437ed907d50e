use schemars::JsonSchema;
use serde::{ Deserialize, Serialize };

/// Structured verdict of the review stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReviewResult {
    /// Explain your reasoning
    pub reasoning: String,

    /// Does the game pass your criteria?
    #[serde(default)]
    pub correct: bool,
}

/// Payload handed to the reviewer: the original request next to the code under review
#[derive(Debug, Clone, Serialize)]
pub struct ReviewInput<'a> {
    pub game_description: &'a str,
    pub game_code: &'a str,
}

impl<'a> ReviewInput<'a> {
    pub fn new(game_description: &'a str, game_code: &'a str) -> Self {
        Self { game_description, game_code }
    }

    /// Pretty-printed JSON used as the reviewer's user message
    pub fn to_message(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
