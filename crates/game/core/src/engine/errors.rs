//! Errors surfaced while driving a match through the engine.

use crate::error::{ErrorSeverity, GameError};
use crate::movement::MovementError;
use crate::state::{MatchOutcome, PlayerId, StateError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("match is already over ({0})")]
    MatchOver(MatchOutcome),

    #[error("expected {expected} input, engine is at {actual}")]
    UnexpectedInput {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("a roll must be at least 1")]
    ZeroRoll,

    #[error("route {index} is not offered ({available} available)")]
    UnknownRoute { index: usize, available: usize },

    #[error("participant {0} cannot be selected")]
    InvalidSelection(PlayerId),

    #[error("participant {0} has no skip-question charge left")]
    NoSkipCharge(PlayerId),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Movement(#[from] MovementError),
}

impl GameError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MatchOver(_) => ErrorSeverity::Fatal,
            Self::UnexpectedInput { .. }
            | Self::ZeroRoll
            | Self::UnknownRoute { .. }
            | Self::InvalidSelection(_)
            | Self::NoSkipCharge(_) => ErrorSeverity::Validation,
            Self::State(err) => err.severity(),
            Self::Movement(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MatchOver(_) => "ENGINE_MATCH_OVER",
            Self::UnexpectedInput { .. } => "ENGINE_UNEXPECTED_INPUT",
            Self::ZeroRoll => "ENGINE_ZERO_ROLL",
            Self::UnknownRoute { .. } => "ENGINE_UNKNOWN_ROUTE",
            Self::InvalidSelection(_) => "ENGINE_INVALID_SELECTION",
            Self::NoSkipCharge(_) => "ENGINE_NO_SKIP_CHARGE",
            Self::State(err) => err.error_code(),
            Self::Movement(err) => err.error_code(),
        }
    }
}
