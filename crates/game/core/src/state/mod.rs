//! Mutable match state.
//!
//! [`GameState`] is the single source of truth for a match. Only
//! [`crate::engine::GameEngine`] mutates it; everything else reads snapshots.
mod abilities;
mod error;
mod player;
mod turn;

use std::collections::BTreeSet;

pub use abilities::{Abilities, Charge, RegionSpeed};
pub use error::StateError;
pub use player::{Direction, Element, PlayerId, PlayerState, ProfileRef};
pub use turn::{
    ActiveTile, MatchOutcome, PendingStep, Prompt, QuestionContext, TurnPhase, TurnState,
};

use crate::board::Landing;
use crate::config::GameConfig;
use crate::movement::MovementController;

/// A seated participant and the controller that walks their token.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Participant {
    pub player: PlayerState,
    pub mover: MovementController,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Seed every random draw of the match derives from.
    pub game_seed: u64,
    /// Sequence number of random draws, mixed into each seed.
    pub nonce: u64,
    pub roster: Vec<Participant>,
    pub turn: TurnState,
    /// Participants holding a shield card. Consumed by the next life loss.
    pub protected: BTreeSet<PlayerId>,
}

impl GameState {
    /// Seats `players` in the given order. The first one starts.
    pub fn new(game_seed: u64, players: Vec<PlayerState>) -> Result<Self, StateError> {
        let first = players.first().ok_or(StateError::EmptyRoster)?.id;
        if players.len() > GameConfig::MAX_PLAYERS {
            return Err(StateError::TooManyPlayers {
                max: GameConfig::MAX_PLAYERS,
                requested: players.len(),
            });
        }
        let mut seen = BTreeSet::new();
        for player in &players {
            if !seen.insert(player.id) {
                return Err(StateError::DuplicatePlayer(player.id));
            }
        }

        Ok(Self {
            game_seed,
            nonce: 0,
            roster: players
                .into_iter()
                .map(|player| Participant {
                    player,
                    mover: MovementController::new(),
                })
                .collect(),
            turn: TurnState::new(first),
            protected: BTreeSet::new(),
        })
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.participant(id).map(|participant| &participant.player)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut PlayerState> {
        self.participant_mut(id).map(|participant| &mut participant.player)
    }

    pub fn participant(&self, id: PlayerId) -> Option<&Participant> {
        self.roster
            .iter()
            .find(|participant| participant.player.id == id)
    }

    pub fn participant_mut(&mut self, id: PlayerId) -> Option<&mut Participant> {
        self.roster
            .iter_mut()
            .find(|participant| participant.player.id == id)
    }

    pub fn players(&self) -> impl Iterator<Item = &PlayerState> {
        self.roster.iter().map(|participant| &participant.player)
    }

    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.players().map(|player| player.id).collect()
    }

    /// Roster position of `id`.
    pub fn seat_of(&self, id: PlayerId) -> Option<usize> {
        self.roster
            .iter()
            .position(|participant| participant.player.id == id)
    }

    /// Participants whose token rests on `landing`.
    pub fn occupants_of(&self, landing: &Landing) -> Vec<PlayerId> {
        self.players()
            .filter(|player| player.is_at(landing))
            .map(|player| player.id)
            .collect()
    }

    pub fn is_over(&self) -> bool {
        self.turn.outcome.is_terminal()
    }
}
