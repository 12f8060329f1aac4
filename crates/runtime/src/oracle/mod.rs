//! Static match content shared with the engine.
//!
//! The [`OracleManager`] owns the board, route table, card catalog and rules
//! behind `Arc`s and lends them to [`trails_core::GameEngine`] as a
//! [`GameEnv`]. The data is immutable at runtime; dynamic state lives in
//! [`trails_core::GameState`] and the repositories.

use std::sync::Arc;

use trails_content::{BoardSetup, Content};
use trails_core::{Board, CardCatalog, GameConfig, GameEnv, IntersectionTable, PcgRng};

#[derive(Clone, Debug)]
pub struct OracleManager {
    pub(crate) board: Arc<Board>,
    pub(crate) intersections: Arc<IntersectionTable>,
    pub(crate) cards: Arc<CardCatalog>,
    pub(crate) config: Arc<GameConfig>,
    pub(crate) rng: PcgRng,
}

impl OracleManager {
    pub fn new(setup: BoardSetup, cards: CardCatalog, config: GameConfig) -> Self {
        Self {
            board: Arc::new(setup.board),
            intersections: Arc::new(setup.intersections),
            cards: Arc::new(cards),
            config: Arc::new(config),
            rng: PcgRng,
        }
    }

    /// Oracles for loaded content with the standard deck.
    pub fn from_content(content: &Content) -> Self {
        Self::new(
            content.board.clone(),
            CardCatalog::standard(),
            content.config.clone(),
        )
    }

    /// Converts the oracle manager into the engine's environment.
    pub fn as_game_env(&self) -> GameEnv<'_> {
        GameEnv::new(
            self.board.as_ref(),
            self.intersections.as_ref(),
            self.cards.as_ref(),
            self.config.as_ref(),
            &self.rng,
        )
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn intersections(&self) -> &IntersectionTable {
        &self.intersections
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn cards(&self) -> &CardCatalog {
        &self.cards
    }
}
