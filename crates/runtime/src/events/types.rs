//! Runtime-level events published next to the engine's own.

use serde::{Deserialize, Serialize};
use trails_core::{MatchOutcome, PlayerId, Prompt};

/// The engine is blocked on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptEvent {
    pub turn: u64,
    pub prompt: Prompt,
}

/// Session bookkeeping outside the rules themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    SnapshotSaved {
        turn: u64,
    },
    SnapshotFailed {
        turn: u64,
        error: String,
    },
    MatchFinished {
        outcome: MatchOutcome,
        decided_by: Option<PlayerId>,
        turns: u64,
    },
}
