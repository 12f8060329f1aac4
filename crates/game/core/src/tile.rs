//! Tile dispatch: decides whether a landing fires its tile effect and for whom.

use strum::{Display, IntoStaticStr};

use crate::board::{Board, Landing, TileKind};
use crate::config::GameConfig;
use crate::state::{GameState, PlayerId};

/// Why a landing did not fire its tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SkipReason {
    /// No participant could be attributed to the landing.
    NoOccupant,
    /// Arrived by an effect move before the final waypoint.
    EffectMovement,
    /// Intersections carry no effect.
    Intersection,
    /// Landing is not on the board.
    UnknownWaypoint,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileAction {
    AskQuestion,
    DrawCard,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dispatch {
    Fire {
        occupant: PlayerId,
        action: TileAction,
    },
    Skip {
        occupant: Option<PlayerId>,
        reason: SkipReason,
    },
}

/// Participant a landing is attributed to.
///
/// Priority: the participant whose move is being resolved, then the one
/// answering a question, then the sole token on the waypoint.
pub fn resolve_occupant(state: &GameState, landing: &Landing) -> Option<PlayerId> {
    let present = |id: &PlayerId| {
        state
            .player(*id)
            .is_some_and(|player| player.is_at(landing))
    };
    if let Some(selected) = state.turn.selected_player.filter(present) {
        return Some(selected);
    }
    if let Some(answering) = state.turn.question_player.filter(present) {
        return Some(answering);
    }
    match state.occupants_of(landing).as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}

/// Decides what a landing does.
///
/// Effect moves are inert except on the final waypoint, which is always
/// adjudicated so a finish reached by a card still wins or loses.
pub fn decide(
    state: &GameState,
    board: &Board,
    config: &GameConfig,
    landing: &Landing,
    effect_movement: bool,
) -> Dispatch {
    let occupant = resolve_occupant(state, landing);
    let Some(waypoint) = board.get_waypoint(&landing.path, landing.index) else {
        return Dispatch::Skip {
            occupant,
            reason: SkipReason::UnknownWaypoint,
        };
    };
    let action = match waypoint.kind {
        TileKind::Question => TileAction::AskQuestion,
        TileKind::Card => TileAction::DrawCard,
        TileKind::Intersection => {
            return Dispatch::Skip {
                occupant,
                reason: SkipReason::Intersection,
            };
        }
    };
    if effect_movement && !config.is_final(landing.index) {
        return Dispatch::Skip {
            occupant,
            reason: SkipReason::EffectMovement,
        };
    }
    match occupant {
        Some(occupant) => Dispatch::Fire { occupant, action },
        None => Dispatch::Skip {
            occupant: None,
            reason: SkipReason::NoOccupant,
        },
    }
}
