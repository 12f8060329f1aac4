//! Notifications emitted by the engine as a match unfolds.
//!
//! The engine buffers events while it mutates state; callers drain them with
//! [`crate::engine::GameEngine::take_events`] and forward them to observers.

use strum::IntoStaticStr;

use crate::board::{Destination, Landing};
use crate::card::CardKind;
use crate::question::{Difficulty, QuestionReward};
use crate::state::{Direction, PlayerId};
use crate::tile::SkipReason;

/// Which protection absorbed a life loss.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShieldSource {
    Card,
    Ability,
}

#[derive(Clone, Debug, PartialEq, Eq, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum GameEvent {
    DiceRollStarted {
        player: PlayerId,
    },
    DiceRollCompleted {
        player: PlayerId,
        roll: u32,
    },
    MovementStarted {
        player: PlayerId,
        from: Landing,
        steps: u32,
        effect: bool,
    },
    WaypointReached {
        player: PlayerId,
        landing: Landing,
    },
    IntersectionReached {
        player: PlayerId,
        at: Landing,
        remaining: u32,
        routes: usize,
    },
    RouteChosen {
        player: PlayerId,
        route: Option<Destination>,
    },
    MovementFinished {
        player: PlayerId,
        landing: Landing,
        effect: bool,
    },
    Teleported {
        player: PlayerId,
        from: Landing,
        to: Landing,
    },
    PositionsSwapped {
        player: PlayerId,
        other: PlayerId,
    },
    TileEffectSkipped {
        landing: Landing,
        occupant: Option<PlayerId>,
        reason: SkipReason,
    },
    QuestionAsked {
        player: PlayerId,
        landing: Landing,
        retry: bool,
    },
    QuestionAnswered {
        player: PlayerId,
        difficulty: Difficulty,
        correct: bool,
    },
    QuestionSkipped {
        player: PlayerId,
    },
    RetryGranted {
        player: PlayerId,
    },
    RewardApplied {
        player: PlayerId,
        reward: QuestionReward,
    },
    CardDrawn {
        player: PlayerId,
        card: CardKind,
    },
    GambleResolved {
        player: PlayerId,
        won: bool,
    },
    LivesChanged {
        player: PlayerId,
        lives: u32,
        delta: i32,
    },
    ShieldGranted {
        player: PlayerId,
    },
    ShieldAbsorbed {
        player: PlayerId,
        source: ShieldSource,
    },
    DirectionReversed {
        player: PlayerId,
        direction: Direction,
    },
    SkipTurnScheduled {
        player: PlayerId,
        pending: u32,
    },
    TileEffectResolved {
        player: PlayerId,
        landing: Landing,
    },
    TurnAdvanced {
        from: PlayerId,
        to: PlayerId,
        turn_number: u64,
    },
    TurnSkipped {
        player: PlayerId,
        remaining: u32,
    },
    ExtraTurnGranted {
        player: PlayerId,
    },
    GameWon {
        player: PlayerId,
    },
    GameLost {
        player: PlayerId,
    },
    GameStalled {
        attempts: u32,
    },
}

impl GameEvent {
    /// Stable snake_case name for logs.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Whether this event ends the match.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::GameWon { .. } | Self::GameLost { .. } | Self::GameStalled { .. }
        )
    }
}
