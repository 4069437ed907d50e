pub mod models;
pub mod traits;
pub mod errors;
pub mod config;
pub mod implementations;
#[cfg(test)]
pub mod tests;

// Re-export core components
pub use config::WorkflowOptions;
pub use errors::{ GameGenError, GameGenResult };
pub use implementations::config::{ AgentProfile, GeneratorConfig, OutputConfig, Provider };
pub use implementations::game_generator::LLMGameGenerator;
pub use implementations::game_reviewer::LLMGameReviewer;
pub use implementations::llm_client::{ HttpChatModel, LlmError };
pub use implementations::workflow::GameWorkflow;
pub use models::{
    generation::GenerationResult,
    review::{ ReviewInput, ReviewResult },
    outcome::{ FailureKind, RunOutcome, RunReport },
};
pub use traits::{ ChatModel, GameGenerator, GameReviewer, StructuredPrompt };
