//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, the engine and
//! input providers so clients can bubble them up with consistent context.
use std::fmt;

use thiserror::Error;
use tokio::sync::oneshot;
use trails_core::{EngineError, ErrorSeverity, GameError, PlayerId, StateError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{kind} provider not set")]
    ProviderNotSet { kind: ProviderKind },

    #[error("{kind} provider failed: {message}")]
    ProviderFailed { kind: ProviderKind, message: String },

    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("runtime requires oracles to be configured before building")]
    MissingOracles,

    #[error("runtime requires an initial match state before building")]
    MissingInitialState,

    #[error("failed to seat participants")]
    InitialState(#[source] StateError),

    #[error("participant {0} is not seated in this match")]
    UnknownPlayer(PlayerId),

    #[error("question bank has no questions")]
    EmptyQuestionBank,
}

impl RuntimeError {
    /// Input errors the caller can correct by submitting again.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Engine(err) => err.severity() == ErrorSeverity::Validation,
            _ => false,
        }
    }
}

/// Who supplies a participant's decisions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// A person at a terminal or UI.
    Interactive,
    /// Automated participant.
    Bot,
    /// Question generator.
    Questions,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderKind::Interactive => "interactive",
            ProviderKind::Bot => "bot",
            ProviderKind::Questions => "questions",
        };
        write!(f, "{}", label)
    }
}
