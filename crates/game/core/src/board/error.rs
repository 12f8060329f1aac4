use crate::error::{ErrorSeverity, GameError};

use super::Landing;

/// Errors raised by path graph lookups and board construction.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("unknown path `{0}`")]
    UnknownPath(String),

    #[error("index {index} is out of range for path `{path}` (len {len})")]
    IndexOutOfRange { path: String, index: u32, len: u32 },

    #[error("path `{0}` is already registered")]
    DuplicatePath(String),

    #[error("path `{0}` has no waypoints")]
    EmptyPath(String),

    #[error("waypoint {0} is not an intersection")]
    NotAnIntersection(Landing),

    #[error("intersection {at} routes to {target} which does not exist")]
    DanglingDestination { at: Landing, target: Landing },
}

impl GameError for BoardError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownPath(_) | Self::IndexOutOfRange { .. } => ErrorSeverity::Recoverable,
            Self::DuplicatePath(_)
            | Self::EmptyPath(_)
            | Self::NotAnIntersection(_)
            | Self::DanglingDestination { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownPath(_) => "BOARD_UNKNOWN_PATH",
            Self::IndexOutOfRange { .. } => "BOARD_INDEX_OUT_OF_RANGE",
            Self::DuplicatePath(_) => "BOARD_DUPLICATE_PATH",
            Self::EmptyPath(_) => "BOARD_EMPTY_PATH",
            Self::NotAnIntersection(_) => "BOARD_NOT_AN_INTERSECTION",
            Self::DanglingDestination { .. } => "BOARD_DANGLING_DESTINATION",
        }
    }
}
