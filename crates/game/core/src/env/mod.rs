//! Read-only collaborators the engine consults while resolving a turn.
//!
//! [`GameEnv`] bundles borrowed references so a single value can be passed
//! to the engine. Owners (the runtime, tests) keep the data alive.
mod rng;

pub use rng::{PcgRng, RngOracle, RollContext, compute_seed};

use crate::board::{Board, IntersectionTable};
use crate::card::CardCatalog;
use crate::config::GameConfig;

#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    board: &'a Board,
    intersections: &'a IntersectionTable,
    cards: &'a CardCatalog,
    config: &'a GameConfig,
    rng: &'a dyn RngOracle,
}

impl<'a> GameEnv<'a> {
    pub fn new(
        board: &'a Board,
        intersections: &'a IntersectionTable,
        cards: &'a CardCatalog,
        config: &'a GameConfig,
        rng: &'a dyn RngOracle,
    ) -> Self {
        Self {
            board,
            intersections,
            cards,
            config,
            rng,
        }
    }

    pub fn board(&self) -> &'a Board {
        self.board
    }

    pub fn intersections(&self) -> &'a IntersectionTable {
        self.intersections
    }

    pub fn cards(&self) -> &'a CardCatalog {
        self.cards
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }
}

impl std::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEnv")
            .field("paths", &self.board.len())
            .field("intersections", &self.intersections.len())
            .field("cards", &self.cards.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
