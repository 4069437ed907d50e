use std::collections::VecDeque;
use std::sync::atomic::{ AtomicUsize, Ordering };
use std::sync::{ Arc, Mutex };

use async_trait::async_trait;
use log::info;

use crate::errors::{ GameGenError, GameGenResult };
use crate::implementations::llm_client::LlmError;
use crate::models::{ GenerationResult, ReviewResult };
use crate::traits::{ ChatModel, GameGenerator, GameReviewer, StructuredPrompt };

mod llm_client_tests;

// Setup function to initialize logging
pub fn setup() {
    if env_logger::builder().is_test(true).try_init().is_ok() {
        info!("Logger initialized");
    }
}

/// Chat model that replays canned replies and records every prompt it saw
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    pub prompts: Mutex<Vec<StructuredPrompt>>,
}

impl ScriptedModel {
    pub fn with_replies(replies: Vec<Result<String, LlmError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompt(&self, index: usize) -> StructuredPrompt {
        self.prompts.lock().unwrap()[index].clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn complete(&self, prompt: &StructuredPrompt) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.clone());
        self.replies.lock().unwrap().pop_front().unwrap_or(Err(LlmError::EmptyResponse))
    }

    fn model_name(&self) -> String {
        "scripted".to_string()
    }
}

/// Generator returning a fixed result, or a generation failure when `None`
pub struct StubGenerator {
    pub result: Option<GenerationResult>,
    pub calls: Arc<AtomicUsize>,
}

impl StubGenerator {
    pub fn returning(code: &str, instructions: &str) -> Self {
        Self {
            result: Some(GenerationResult {
                reasoning: "Canvas game loop with W/S controls".to_string(),
                code: code.to_string(),
                instructions: instructions.to_string(),
            }),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self { result: None, calls: Arc::new(AtomicUsize::new(0)) }
    }
}

#[async_trait]
impl GameGenerator for StubGenerator {
    async fn generate(&self, _description: &str) -> GameGenResult<GenerationResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result
            .clone()
            .ok_or_else(|| GameGenError::GenerationFailed("no parseable result".to_string()))
    }
}

/// Reviewer returning a fixed verdict, or a review failure when `None`
pub struct StubReviewer {
    pub verdict: Option<bool>,
    pub calls: Arc<AtomicUsize>,
}

impl StubReviewer {
    pub fn approving() -> Self {
        Self { verdict: Some(true), calls: Arc::new(AtomicUsize::new(0)) }
    }

    pub fn rejecting() -> Self {
        Self { verdict: Some(false), calls: Arc::new(AtomicUsize::new(0)) }
    }

    pub fn failing() -> Self {
        Self { verdict: None, calls: Arc::new(AtomicUsize::new(0)) }
    }
}

#[async_trait]
impl GameReviewer for StubReviewer {
    async fn review(&self, _description: &str, _code: &str) -> GameGenResult<ReviewResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.verdict {
            Some(correct) =>
                Ok(ReviewResult {
                    reasoning: if correct {
                        "Meets every requirement".to_string()
                    } else {
                        "AI paddle moves instantly".to_string()
                    },
                    correct,
                }),
            None => Err(GameGenError::ReviewFailed("malformed verdict".to_string())),
        }
    }
}
