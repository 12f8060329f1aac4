//! Deterministic rules of the trails board game.
//!
//! `trails-core` owns the path graph, the per-participant movement state
//! machine, tile dispatch, cards, question rewards and turn orchestration.
//! It performs no I/O: dice, answers, route choices and player selections
//! reach the engine as inputs, and everything the engine does is reported
//! as [`GameEvent`]s. All state mutation flows through [`GameEngine`].
pub mod board;
pub mod card;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod movement;
pub mod question;
pub mod state;
pub mod tile;

pub use board::{
    Board, BoardError, Destination, IntersectionChoice, IntersectionTable, Landing, Region,
    TileKind, Waypoint,
};
pub use card::{CardCatalog, CardKind};
pub use config::GameConfig;
pub use engine::{EngineError, GameEngine, TickStatus};
pub use env::{GameEnv, PcgRng, RngOracle, RollContext, compute_seed};
pub use error::{ErrorSeverity, GameError};
pub use event::{GameEvent, ShieldSource};
pub use movement::{MoveRequest, MovementController, MovementError, MovementState, StepOutcome};
pub use question::{Answer, Difficulty, Question, QuestionResponse, QuestionReward};
pub use state::{
    Abilities, Charge, Direction, Element, GameState, MatchOutcome, Participant, PendingStep,
    PlayerId, PlayerState, ProfileRef, Prompt, RegionSpeed, StateError, TurnPhase, TurnState,
};
pub use tile::{Dispatch, SkipReason, TileAction};
