use clap::{ Parser, Subcommand };
use std::path::PathBuf;

pub mod commands;
pub mod ui;

/// Description used when none is given on the command line or at the prompt
pub const DEFAULT_DESCRIPTION: &str = "Create an enhanced Pong game";

#[derive(Parser)]
#[command(
    name = "gameforge",
    about = "Generates single-file HTML5 games with an LLM and gates them behind an LLM review",
    version,
    author,
    long_about = None
)]
pub struct GameforgeCli {
    /// Sets the log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    /// Path to configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a game, review it, and save it on approval
    Generate {
        /// Free-text game description (prompted for when omitted)
        description: Option<String>,

        /// Output file for the accepted game
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Model to use for both agents
        #[arg(short, long)]
        model: Option<String>,

        /// Open the accepted game in the default browser
        #[arg(long, default_value = "false")]
        open: bool,
    },

    /// Review an existing HTML game file
    Review {
        /// Path to the HTML file
        #[arg(short, long)]
        file: PathBuf,

        /// Description the game is judged against
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Write the default configuration to a YAML file
    InitConfig {
        /// Destination file
        #[arg(default_value = "gameforge.yaml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long, default_value = "false")]
        force: bool,
    },
}
