pub mod config;
pub mod llm_client;
pub mod structured;
pub mod game_generator;
pub mod game_reviewer;
pub mod workflow;
