//! Public runtime API surface.
//!
//! Gathers the types exposed to consumers of the runtime crate so other
//! layers can stay focused on orchestration, workers, or persistence.

pub mod errors;
pub mod handle;
pub mod providers;
pub mod registry;

pub use errors::{ProviderKind, Result, RuntimeError};
pub use handle::RuntimeHandle;
pub use providers::{AnswerChoice, InputProvider, PassiveProvider, QuestionProvider};
pub use registry::ProviderRegistry;
