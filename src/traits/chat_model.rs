use async_trait::async_trait;

use crate::implementations::llm_client::LlmError;

/// A single prompt that expects a JSON object back, described by `schema`
#[derive(Debug, Clone)]
pub struct StructuredPrompt {
    pub system: String,
    pub user: String,
    pub schema_name: String,
    pub schema: serde_json::Value,
}

/// Blocking round trip to a hosted chat model
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send the prompt and return the raw text of the model's reply
    async fn complete(&self, prompt: &StructuredPrompt) -> Result<String, LlmError>;

    /// Human readable model identifier, used in logs
    fn model_name(&self) -> String;
}
