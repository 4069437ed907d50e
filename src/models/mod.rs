pub mod generation;
pub mod review;
pub mod outcome;

// Re-export common model types
pub use generation::GenerationResult;
pub use review::{ ReviewInput, ReviewResult };
pub use outcome::{ FailureKind, RunOutcome, RunReport };
