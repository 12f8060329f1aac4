//! Common error infrastructure for trails-core.
//!
//! Domain-specific errors (`BoardError`, `MovementError`, `EngineError`) live
//! next to the component that raises them. They all implement [`GameError`]
//! so callers can decide between logging and continuing, rejecting input,
//! or tearing down the session.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the turn loop logs and falls back to a safe default
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistency
/// - **Fatal**: the session cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Degrades gracefully: unknown path, out-of-range index, no occupant.
    Recoverable,

    /// Invalid input from a collaborator: wrong prompt, bad step count.
    Validation,

    /// Bookkeeping desync between the roster and the turn state.
    Internal,

    /// Session-level failure: empty roster, match already over.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if the turn loop may continue after logging this error.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all trails-core errors.
///
/// - All error enums implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a stable identifier for this error variant.
    ///
    /// Used for log fields and for matching in tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
