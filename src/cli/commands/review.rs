use anyhow::{ anyhow, Context, Result };
use std::fs;
use std::path::Path;
use std::sync::Arc;

use gameforge::{ ChatModel, GameReviewer, GeneratorConfig, HttpChatModel, LLMGameReviewer };

use crate::cli::{ ui, DEFAULT_DESCRIPTION };

/// Review an existing game file without generating anything
pub async fn execute(config: &GeneratorConfig, file: &Path, description: Option<&str>) -> Result<()> {
    ui::print_header("Reviewing HTML5 Game");

    let code = fs
        ::read_to_string(file)
        .with_context(|| format!("Failed to read game file {}", file.display()))?;
    let description = description.unwrap_or(DEFAULT_DESCRIPTION);

    ui::print_info(&format!("Loaded {} characters from {}", code.len(), file.display()));

    let model: Arc<dyn ChatModel> = Arc::new(HttpChatModel::from_config(config)?);
    let reviewer = LLMGameReviewer::new(model, config.reviewer.clone());

    let spinner = ui::spinner_with_message("Reviewing game...");
    let verdict = reviewer.review(description, &code).await;
    spinner.finish_and_clear();
    let verdict = verdict?;

    ui::print_verdict(verdict.correct, &verdict.reasoning);

    if verdict.correct {
        Ok(())
    } else {
        Err(anyhow!("{} was rejected by review", file.display()))
    }
}
