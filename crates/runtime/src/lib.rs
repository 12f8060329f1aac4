//! Runtime orchestration for trails matches.
//!
//! This crate wires together the input provider abstraction, static content,
//! repositories, and the simulation worker into a cohesive runtime API.
//! Consumers embed [`Runtime`] to play matches, subscribe to events, and
//! answer prompts through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event routing
//! - [`providers`] ships reference bots and the question bank
//! - [`oracle`] and [`repository`] provide data adapters reused by clients
pub mod api;
pub mod events;
pub mod oracle;
pub mod providers;
pub mod repository;
pub mod runtime;
pub mod setup;

mod workers;

pub use api::{
    AnswerChoice, InputProvider, PassiveProvider, ProviderKind, ProviderRegistry,
    QuestionProvider, Result, RuntimeError, RuntimeHandle,
};
pub use events::{Event, EventBus, PromptEvent, SessionEvent, Topic};
pub use oracle::OracleManager;
pub use providers::{BotProvider, DifficultyBands, QuestionBank};
pub use repository::{
    FileProfileRepository, FileStateRepository, InMemoryProfileRepo, InMemoryStateRepo, Profile,
    ProfileRepository, RatingChange, RepositoryError, StateRepository,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use setup::{START_PATH, new_match};
