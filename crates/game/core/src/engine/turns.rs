//! Turn hand-over: extra turns, skipped turns, and the stall guard.

use tracing::{info, warn};

use crate::event::GameEvent;
use crate::state::{MatchOutcome, PlayerId, StateError, TurnPhase};

use super::{EngineError, GameEngine};

impl<'a> GameEngine<'a> {
    /// Closes the tile resolution once the pending queue is drained.
    pub(super) fn complete_resolution(&mut self) {
        if let Some(tile) = self.state.turn.active_tile.take() {
            self.emit(GameEvent::TileEffectResolved {
                player: tile.player,
                landing: tile.landing,
            });
        }
        self.state.turn.phase = TurnPhase::AdvancingTurn;
        self.state.turn.pause_ticks = self.env.config().turn_end_pause_ticks;
    }

    /// Passes control to the next participant.
    ///
    /// An extra turn keeps the current participant. Otherwise seats are
    /// probed in order; each probe of a participant with skipped turns
    /// forfeits one of them. After `skip_attempt_factor * players` probes
    /// without a taker the match is stalled.
    pub(super) fn advance_turn(&mut self) -> Result<(), EngineError> {
        let from = self.state.turn.current_player;

        if self.state.turn.is_extra_turn {
            self.state.turn.is_extra_turn = false;
            self.hand_over(from, from);
            return Ok(());
        }

        let seats = self.state.roster.len();
        let Some(mut seat) = self.state.seat_of(from) else {
            return Err(EngineError::State(StateError::UnknownPlayer(from)));
        };
        let attempts = self.env.config().skip_attempt_factor.max(1) * seats as u32;

        for _ in 0..attempts {
            seat = (seat + 1) % seats;
            let candidate = &mut self.state.roster[seat].player;
            if candidate.skip_turns == 0 {
                let next = candidate.id;
                self.hand_over(from, next);
                return Ok(());
            }
            candidate.skip_turns -= 1;
            let (player, remaining) = (candidate.id, candidate.skip_turns);
            info!(target: "trails::engine", %player, remaining, "turn skipped");
            self.emit(GameEvent::TurnSkipped { player, remaining });
        }

        warn!(target: "trails::engine", attempts, "no participant could take a turn");
        self.state.turn.conclude(MatchOutcome::Stalled, None);
        self.emit(GameEvent::GameStalled { attempts });
        Ok(())
    }

    fn hand_over(&mut self, from: PlayerId, to: PlayerId) {
        let turn = &mut self.state.turn;
        turn.begin_turn(to);
        turn.turn_number += 1;
        let turn_number = turn.turn_number;
        self.emit(GameEvent::TurnAdvanced {
            from,
            to,
            turn_number,
        });
    }
}
