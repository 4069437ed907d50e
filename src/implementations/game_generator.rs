use std::sync::Arc;

use async_trait::async_trait;
use log::{ debug, error, info };

use crate::errors::{ GameGenError, GameGenResult };
use crate::implementations::config::AgentProfile;
use crate::implementations::structured::{ build_system_prompt, parse_structured, schema_for };
use crate::models::generation::GenerationResult;
use crate::traits::chat_model::{ ChatModel, StructuredPrompt };
use crate::traits::game_generator::GameGenerator;

const SCHEMA_NAME: &str = "GenerationResult";

/// Game developer agent backed by a chat model
#[derive(Clone)]
pub struct LLMGameGenerator {
    model: Arc<dyn ChatModel>,
    profile: AgentProfile,
}

impl LLMGameGenerator {
    pub fn new(model: Arc<dyn ChatModel>, profile: AgentProfile) -> Self {
        Self { model, profile }
    }

    fn prompt_for(&self, description: &str) -> GameGenResult<StructuredPrompt> {
        let schema = schema_for::<GenerationResult>();
        Ok(StructuredPrompt {
            system: build_system_prompt(&self.profile, SCHEMA_NAME, &schema)?,
            user: description.to_string(),
            schema_name: SCHEMA_NAME.to_string(),
            schema,
        })
    }
}

#[async_trait]
impl GameGenerator for LLMGameGenerator {
    async fn generate(&self, description: &str) -> GameGenResult<GenerationResult> {
        info!("{} generating game with {}", self.profile.name, self.model.model_name());

        let prompt = self
            .prompt_for(description)
            .map_err(|e| GameGenError::GenerationFailed(e.to_string()))?;

        let reply = self.model.complete(&prompt).await.map_err(|e| {
            error!("Developer agent call failed: {}", e);
            GameGenError::GenerationFailed(e.to_string())
        })?;

        let result: GenerationResult = parse_structured(&reply).map_err(|e|
            GameGenError::GenerationFailed(e.to_string())
        )?;

        if !result.has_code() {
            return Err(GameGenError::GenerationFailed("model returned empty game code".to_string()));
        }

        debug!("Generated {} characters of game code", result.code.len());
        Ok(result)
    }
}
