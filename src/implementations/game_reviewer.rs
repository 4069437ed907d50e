use std::sync::Arc;

use async_trait::async_trait;
use log::{ debug, error, info };

use crate::errors::{ GameGenError, GameGenResult };
use crate::implementations::config::AgentProfile;
use crate::implementations::structured::{ build_system_prompt, parse_structured, schema_for };
use crate::models::review::{ ReviewInput, ReviewResult };
use crate::traits::chat_model::{ ChatModel, StructuredPrompt };
use crate::traits::game_reviewer::GameReviewer;

const SCHEMA_NAME: &str = "ReviewResult";

/// QA agent backed by a chat model
#[derive(Clone)]
pub struct LLMGameReviewer {
    model: Arc<dyn ChatModel>,
    profile: AgentProfile,
}

impl LLMGameReviewer {
    pub fn new(model: Arc<dyn ChatModel>, profile: AgentProfile) -> Self {
        Self { model, profile }
    }

    fn prompt_for(&self, description: &str, code: &str) -> GameGenResult<StructuredPrompt> {
        let schema = schema_for::<ReviewResult>();
        Ok(StructuredPrompt {
            system: build_system_prompt(&self.profile, SCHEMA_NAME, &schema)?,
            user: ReviewInput::new(description, code).to_message()?,
            schema_name: SCHEMA_NAME.to_string(),
            schema,
        })
    }
}

#[async_trait]
impl GameReviewer for LLMGameReviewer {
    async fn review(&self, description: &str, code: &str) -> GameGenResult<ReviewResult> {
        info!("{} reviewing {} characters of game code", self.profile.name, code.len());

        let prompt = self
            .prompt_for(description, code)
            .map_err(|e| GameGenError::ReviewFailed(e.to_string()))?;

        let reply = self.model.complete(&prompt).await.map_err(|e| {
            error!("QA agent call failed: {}", e);
            GameGenError::ReviewFailed(e.to_string())
        })?;

        let verdict: ReviewResult = parse_structured(&reply).map_err(|e|
            GameGenError::ReviewFailed(e.to_string())
        )?;

        debug!("QA verdict: correct={} reasoning={}", verdict.correct, verdict.reasoning);
        Ok(verdict)
    }
}
