use anyhow::{ Context, Result };
use clap::Parser;
use dotenv::dotenv;
use log::{ debug, info };

use gameforge::GeneratorConfig;

mod cli;
use cli::{ Commands, GameforgeCli };

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        cli::ui::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Parse the command line arguments
    let cli = GameforgeCli::parse();

    setup_logging(&cli.log_level);

    if dotenv().is_ok() {
        debug!("Loaded environment variables from .env file");
    }

    let config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            GeneratorConfig::from_file(path).with_context(||
                format!("Failed to load configuration from {}", path.display())
            )?
        }
        None => GeneratorConfig::default(),
    };

    match &cli.command {
        Commands::Generate { description, output, model, open } => {
            cli::commands::generate::execute(
                &config,
                description.as_deref(),
                output.as_deref(),
                model.as_deref(),
                *open
            ).await?;
        }

        Commands::Review { file, description } => {
            cli::commands::review::execute(&config, file, description.as_deref()).await?;
        }

        Commands::InitConfig { path, force } => {
            cli::commands::init_config::execute(path, *force)?;
        }
    }

    Ok(())
}

fn setup_logging(log_level: &str) {
    // Set up the logger based on the log level
    let level = match log_level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };

    env_logger::Builder::new().filter_level(level).init();

    info!("Logger initialized with level: {}", log_level);
}
