pub mod chat_model;
pub mod game_generator;
pub mod game_reviewer;

// Re-export traits
pub use chat_model::{ ChatModel, StructuredPrompt };
pub use game_generator::GameGenerator;
pub use game_reviewer::GameReviewer;
