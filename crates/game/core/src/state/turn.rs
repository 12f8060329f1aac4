use std::collections::VecDeque;

use strum::{Display, IntoStaticStr};

use crate::board::{Destination, Landing};
use crate::movement::MoveRequest;
use crate::question::QuestionReward;

use super::PlayerId;

/// Where the current turn is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TurnPhase {
    /// Waiting for the active participant to roll.
    #[default]
    AwaitingRoll,
    /// Dice result known, short pause before the token starts.
    Rolling,
    /// A token is travelling.
    Moving,
    /// Tile effect and the steps it queued are being worked off.
    ResolvingEffect,
    /// Picking the next participant.
    AdvancingTurn,
}

/// Terminal state of a match. `InProgress` until exactly one other value is reached.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum MatchOutcome {
    #[default]
    InProgress,
    /// Someone answered correctly on the final waypoint.
    Won,
    /// Someone ran out of lives.
    Lost,
    /// Every participant kept skipping; no one could take a turn.
    Stalled,
}

impl MatchOutcome {
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Input the engine is blocked on.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Prompt {
    Roll {
        player: PlayerId,
    },
    IntersectionChoice {
        player: PlayerId,
        at: Landing,
        destinations: Vec<Destination>,
    },
    Question {
        player: PlayerId,
        rating: i32,
        /// The participant may pass on this question.
        can_skip: bool,
        /// Second attempt after a retry charge was spent.
        retry: bool,
    },
    PlayerSelection {
        player: PlayerId,
        candidates: Vec<PlayerId>,
    },
}

impl Prompt {
    /// Participant expected to answer.
    pub fn player(&self) -> PlayerId {
        match self {
            Self::Roll { player }
            | Self::IntersectionChoice { player, .. }
            | Self::Question { player, .. }
            | Self::PlayerSelection { player, .. } => *player,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Roll { .. } => "roll",
            Self::IntersectionChoice { .. } => "intersection_choice",
            Self::Question { .. } => "question",
            Self::PlayerSelection { .. } => "player_selection",
        }
    }
}

/// Work queued by a tile effect, executed in order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PendingStep {
    /// Start a move on the participant's controller.
    Move {
        player: PlayerId,
        request: MoveRequest,
    },
    /// Place a token without walking.
    Teleport { player: PlayerId, to: Landing },
    /// Ask the swap-card holder which participant to trade places with.
    ChoosePlayer { player: PlayerId },
    /// Apply a question reward once the steps ahead of it have run.
    Reward {
        player: PlayerId,
        reward: QuestionReward,
    },
}

/// Question currently awaiting an answer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestionContext {
    pub player: PlayerId,
    /// Waypoint the question was asked on.
    pub landing: Landing,
    pub retry_used: bool,
}

/// Tile effect that fired this turn and has not been reported resolved yet.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveTile {
    pub player: PlayerId,
    pub landing: Landing,
}

/// Turn bookkeeping owned by the orchestrator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    pub current_player: PlayerId,
    pub phase: TurnPhase,
    pub outcome: MatchOutcome,
    /// Participant whose answer or lost life decided the match.
    pub decided_by: Option<PlayerId>,
    /// Completed turn hand-overs.
    pub turn_number: u64,

    pub has_rolled: bool,
    pub last_roll: Option<u32>,
    /// Set while a card or reward moves a token.
    pub is_effect_movement: bool,
    /// The current participant goes again when the turn ends.
    pub is_extra_turn: bool,

    /// Participant whose move is being resolved.
    pub selected_player: Option<PlayerId>,
    /// Participant who is answering or just answered a question.
    pub question_player: Option<PlayerId>,
    /// Participant whose controller is in flight.
    pub moving: Option<PlayerId>,

    pub pause_ticks: u32,
    pub prompt: Option<Prompt>,
    pub question: Option<QuestionContext>,
    pub active_tile: Option<ActiveTile>,
    pub pending: VecDeque<PendingStep>,
}

impl TurnState {
    pub fn new(first: PlayerId) -> Self {
        Self {
            current_player: first,
            phase: TurnPhase::AwaitingRoll,
            outcome: MatchOutcome::InProgress,
            decided_by: None,
            turn_number: 0,
            has_rolled: false,
            last_roll: None,
            is_effect_movement: false,
            is_extra_turn: false,
            selected_player: None,
            question_player: None,
            moving: None,
            pause_ticks: 0,
            prompt: None,
            question: None,
            active_tile: None,
            pending: VecDeque::new(),
        }
    }

    pub fn game_won(&self) -> bool {
        self.outcome == MatchOutcome::Won
    }

    pub fn game_lost(&self) -> bool {
        self.outcome == MatchOutcome::Lost
    }

    /// Resets the per-turn flags when control passes to `next`.
    pub(crate) fn begin_turn(&mut self, next: PlayerId) {
        self.current_player = next;
        self.phase = TurnPhase::AwaitingRoll;
        self.has_rolled = false;
        self.last_roll = None;
        self.is_effect_movement = false;
        self.selected_player = None;
        self.question_player = None;
        self.active_tile = None;
    }

    /// Drops all outstanding work once the match is decided.
    pub(crate) fn conclude(&mut self, outcome: MatchOutcome, decided_by: Option<PlayerId>) {
        self.outcome = outcome;
        self.decided_by = decided_by;
        self.prompt = None;
        self.question = None;
        self.moving = None;
        self.pause_ticks = 0;
        self.pending.clear();
    }
}
