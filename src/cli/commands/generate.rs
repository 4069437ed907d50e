use anyhow::{ anyhow, Result };
use std::path::Path;

use gameforge::{ GameWorkflow, GeneratorConfig, RunOutcome, WorkflowOptions };

use crate::cli::{ ui, DEFAULT_DESCRIPTION };

/// Game generation command
pub async fn execute(
    config: &GeneratorConfig,
    description: Option<&str>,
    output_path: Option<&Path>,
    model: Option<&str>,
    open_in_browser: bool
) -> Result<()> {
    ui::print_header("Generating HTML5 Game");

    let description = match description {
        Some(description) => description.to_string(),
        None => ui::prompt_description(DEFAULT_DESCRIPTION)?,
    };

    let mut config = config.clone();
    if let Some(model) = model {
        config.llm_api.model = Some(model.to_string());
    }

    let options = match output_path {
        Some(path) => WorkflowOptions::new(path),
        None => WorkflowOptions::from(&config.output),
    };
    ui::print_result("Output", &options.output_path().display().to_string());

    let workflow = GameWorkflow::from_config(&config, options)?;

    let spinner = ui::spinner_with_message("Generating and reviewing game...");
    let report = workflow.run(&description).await;
    spinner.finish_and_clear();
    let report = report?;

    ui::print_result("Run", &report.run_id);
    ui::print_result("Elapsed", &format!("{}s", report.elapsed().num_seconds()));

    match report.outcome {
        RunOutcome::Success { instructions, output_path } => {
            ui::print_success(&format!("Game saved to {}", output_path.display()));
            ui::print_header("How to Play");
            ui::print_text(&instructions);

            if open_in_browser {
                if let Err(e) = open::that(&output_path) {
                    ui::print_warning(&format!("Could not open {}: {}", output_path.display(), e));
                }
            }
            Ok(())
        }
        RunOutcome::Failure { kind, reason } => Err(anyhow!("Game {}: {}", kind, reason)),
    }
}
