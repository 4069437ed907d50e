use std::fs;
use std::io::ErrorKind;
use std::sync::Arc;

use chrono::Utc;
use log::{ debug, error, info };

use crate::config::WorkflowOptions;
use crate::errors::{ GameGenError, GameGenResult };
use crate::implementations::config::GeneratorConfig;
use crate::implementations::game_generator::LLMGameGenerator;
use crate::implementations::game_reviewer::LLMGameReviewer;
use crate::implementations::llm_client::HttpChatModel;
use crate::models::outcome::{ FailureKind, RunOutcome, RunReport };
use crate::traits::chat_model::ChatModel;
use crate::traits::game_generator::GameGenerator;
use crate::traits::game_reviewer::GameReviewer;

/// Sequences generation, review and persistence for one description at a time
pub struct GameWorkflow<G, R> {
    generator: G,
    reviewer: R,
    options: WorkflowOptions,
}

impl GameWorkflow<LLMGameGenerator, LLMGameReviewer> {
    /// Wire both agents to the chat model described by `config`
    pub fn from_config(config: &GeneratorConfig, options: WorkflowOptions) -> GameGenResult<Self> {
        let model: Arc<dyn ChatModel> = Arc::new(HttpChatModel::from_config(config)?);
        Ok(
            Self::new(
                LLMGameGenerator::new(model.clone(), config.developer.clone()),
                LLMGameReviewer::new(model, config.reviewer.clone()),
                options
            )
        )
    }
}

impl<G: GameGenerator, R: GameReviewer> GameWorkflow<G, R> {
    pub fn new(generator: G, reviewer: R, options: WorkflowOptions) -> Self {
        Self { generator, reviewer, options }
    }

    /// Run the pipeline once.
    ///
    /// Model failures and rejections come back as `RunOutcome::Failure`; only
    /// local I/O on the output path surfaces as `Err`.
    pub async fn run(&self, description: &str) -> GameGenResult<RunReport> {
        let started_at = Utc::now();
        let run_id = format!("run_{}", started_at.timestamp_millis());
        info!("[{}] Game description: {}", run_id, description);

        self.prepare_output()?;

        let outcome = self.execute(&run_id, description).await?;

        match &outcome {
            RunOutcome::Success { output_path, .. } => {
                info!("[{}] Game written to {}", run_id, output_path.display());
            }
            RunOutcome::Failure { kind, reason } => {
                error!("[{}] Run ended: {} ({})", run_id, kind, reason);
            }
        }

        Ok(RunReport {
            run_id,
            started_at,
            finished_at: Utc::now(),
            outcome,
        })
    }

    async fn execute(&self, run_id: &str, description: &str) -> GameGenResult<RunOutcome> {
        let generation = match self.generator.generate(description).await {
            Ok(generation) => generation,
            Err(e) => {
                return Ok(RunOutcome::failure(FailureKind::Generation, failure_reason(e)));
            }
        };
        info!("[{}] HTML game code generated successfully", run_id);

        info!("[{}] Running QA on the generated game...", run_id);
        let review = match self.reviewer.review(description, &generation.code).await {
            Ok(review) => review,
            Err(e) => {
                return Ok(RunOutcome::failure(FailureKind::Review, failure_reason(e)));
            }
        };
        info!("[{}] QA verdict: correct={}", run_id, review.correct);
        debug!("[{}] QA reasoning: {}", run_id, review.reasoning);

        if !review.correct {
            return Ok(RunOutcome::failure(FailureKind::Rejected, review.reasoning));
        }

        let output_path = self.options.output_path().to_path_buf();
        fs::write(&output_path, generation.code.as_bytes())?;

        Ok(RunOutcome::Success {
            instructions: generation.instructions,
            output_path,
        })
    }

    /// Create the output directory and clear whatever an earlier run left behind
    fn prepare_output(&self) -> GameGenResult<()> {
        let path = self.options.output_path();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        match fs::remove_file(path) {
            Ok(()) => info!("Removed stale game at {}", path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e.into());
            }
        }
        Ok(())
    }
}

/// Stage errors already say which stage failed; keep only the detail
fn failure_reason(err: GameGenError) -> String {
    match err {
        GameGenError::GenerationFailed(reason) | GameGenError::ReviewFailed(reason) => reason,
        other => other.to_string(),
    }
}
