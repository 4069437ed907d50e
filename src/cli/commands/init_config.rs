use anyhow::{ bail, Result };
use std::fs;
use std::path::Path;

use gameforge::GeneratorConfig;

use crate::cli::ui;

/// Write the default configuration so it can be edited by hand
pub fn execute(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let yaml = GeneratorConfig::default().to_yaml()?;
    fs::write(path, yaml)?;

    ui::print_success(&format!("Default configuration written to {}", path.display()));
    ui::print_info("API keys are read from OPENAI_API_KEY or ANTHROPIC_API_KEY when llm_api.api_key is empty");
    Ok(())
}
