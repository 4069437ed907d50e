use std::fmt;
use std::path::PathBuf;

use chrono::{ DateTime, Utc };

/// Which stage ended a failed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Generation,
    Review,
    Rejected,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Generation => write!(f, "generation failed"),
            FailureKind::Review => write!(f, "review failed"),
            FailureKind::Rejected => write!(f, "rejected by review"),
        }
    }
}

/// Terminal value of a single workflow run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Success {
        instructions: String,
        output_path: PathBuf,
    },
    Failure {
        kind: FailureKind,
        reason: String,
    },
}

impl RunOutcome {
    pub fn failure(kind: FailureKind, reason: impl Into<String>) -> Self {
        RunOutcome::Failure { kind, reason: reason.into() }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Success { .. })
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            RunOutcome::Success { .. } => None,
            RunOutcome::Failure { kind, .. } => Some(*kind),
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::Success { instructions, .. } => write!(f, "{}", instructions),
            RunOutcome::Failure { kind, reason } => write!(f, "Game {}: {}", kind, reason),
        }
    }
}

/// A finished run together with its bookkeeping
#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcome: RunOutcome,
}

impl RunReport {
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}
