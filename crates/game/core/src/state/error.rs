//! Roster errors raised while assembling a match.

use crate::error::{ErrorSeverity, GameError};

use super::PlayerId;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    #[error("a match needs at least one participant")]
    EmptyRoster,

    #[error("roster is full (max: {max}, requested: {requested})")]
    TooManyPlayers { max: usize, requested: usize },

    #[error("participant {0} is seated twice")]
    DuplicatePlayer(PlayerId),

    #[error("participant {0} is not seated")]
    UnknownPlayer(PlayerId),
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptyRoster => ErrorSeverity::Fatal,
            Self::TooManyPlayers { .. } | Self::DuplicatePlayer(_) => ErrorSeverity::Validation,
            Self::UnknownPlayer(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyRoster => "STATE_EMPTY_ROSTER",
            Self::TooManyPlayers { .. } => "STATE_TOO_MANY_PLAYERS",
            Self::DuplicatePlayer(_) => "STATE_DUPLICATE_PLAYER",
            Self::UnknownPlayer(_) => "STATE_UNKNOWN_PLAYER",
        }
    }
}
