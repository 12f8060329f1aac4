//! Token movement inside the engine: starting moves, ticking controllers,
//! suspending at intersections, and instant relocations.

use tracing::{debug, warn};

use crate::board::{Destination, Landing};
use crate::event::GameEvent;
use crate::movement::{MoveRequest, StepOutcome};
use crate::state::{PlayerId, Prompt, StateError, TurnPhase};

use super::{EngineError, GameEngine};

impl<'a> GameEngine<'a> {
    pub(super) fn start_movement(
        &mut self,
        player: PlayerId,
        request: MoveRequest,
    ) -> Result<(), EngineError> {
        let board = self.env.board();
        let participant = self
            .state
            .participant_mut(player)
            .ok_or(StateError::UnknownPlayer(player))?;

        let from = participant.player.landing.clone();
        if !request.effect {
            let on_junction = board
                .get_waypoint(&from.path, from.index)
                .is_some_and(|waypoint| waypoint.is_intersection());
            if !on_junction {
                participant.player.previous_landing = from.clone();
            }
        }

        match participant
            .mover
            .begin(&mut participant.player, board, request)
        {
            Ok(steps) => {
                let turn = &mut self.state.turn;
                turn.moving = Some(player);
                turn.selected_player = Some(player);
                turn.is_effect_movement = request.effect;
                turn.phase = TurnPhase::Moving;
                self.emit(GameEvent::MovementStarted {
                    player,
                    from,
                    steps,
                    effect: request.effect,
                });
            }
            Err(err) => {
                warn!(
                    target: "trails::engine",
                    %player,
                    error = %err,
                    "move request ignored"
                );
            }
        }
        Ok(())
    }

    pub(super) fn tick_movement(&mut self, mover: PlayerId) -> Result<(), EngineError> {
        let board = self.env.board();
        let config = self.env.config();
        let participant = self
            .state
            .participant_mut(mover)
            .ok_or(StateError::UnknownPlayer(mover))?;

        match participant
            .mover
            .tick(&mut participant.player, board, config)
        {
            StepOutcome::Idle => {
                warn!(target: "trails::engine", player = %mover, "controller idle while marked moving");
                self.state.turn.moving = None;
            }
            StepOutcome::Waiting | StepOutcome::Advancing => {}
            StepOutcome::Reached(landing) => {
                self.emit(GameEvent::WaypointReached {
                    player: mover,
                    landing,
                });
            }
            StepOutcome::Intersection { at, remaining } => {
                self.reach_intersection(mover, at, remaining)?;
            }
            StepOutcome::Finished(landing) => self.finish_movement(mover, landing)?,
        }
        Ok(())
    }

    fn reach_intersection(
        &mut self,
        player: PlayerId,
        at: Landing,
        remaining: u32,
    ) -> Result<(), EngineError> {
        let destinations = self.env.intersections().available_destinations(&at).to_vec();
        self.emit(GameEvent::IntersectionReached {
            player,
            at: at.clone(),
            remaining,
            routes: destinations.len(),
        });

        if destinations.is_empty() {
            debug!(target: "trails::engine", %player, %at, "no routes mapped, staying on path");
            return self.resume_movement(player, None);
        }
        self.state.turn.prompt = Some(Prompt::IntersectionChoice {
            player,
            at,
            destinations,
        });
        Ok(())
    }

    pub(super) fn resume_movement(
        &mut self,
        player: PlayerId,
        route: Option<Destination>,
    ) -> Result<(), EngineError> {
        let board = self.env.board();
        let participant = self
            .state
            .participant_mut(player)
            .ok_or(StateError::UnknownPlayer(player))?;
        let outcome = participant
            .mover
            .resume(&mut participant.player, board, route.as_ref())?;

        self.emit(GameEvent::RouteChosen { player, route });
        if let StepOutcome::Finished(landing) = outcome {
            self.finish_movement(player, landing)?;
        }
        Ok(())
    }

    fn finish_movement(&mut self, player: PlayerId, landing: Landing) -> Result<(), EngineError> {
        if let Some(participant) = self.state.participant_mut(player) {
            participant.mover.take_finished();
        }
        let effect = self.state.turn.is_effect_movement;
        self.state.turn.moving = None;
        self.state.turn.phase = TurnPhase::ResolvingEffect;
        self.emit(GameEvent::MovementFinished {
            player,
            landing: landing.clone(),
            effect,
        });

        self.dispatch_arrival(landing, effect)?;
        self.state.turn.is_effect_movement = false;
        Ok(())
    }

    /// Places a token without walking. Lands as an effect move.
    pub(super) fn teleport(&mut self, player: PlayerId, to: Landing) -> Result<(), EngineError> {
        if self.env.board().get_waypoint(&to.path, to.index).is_none() {
            warn!(target: "trails::engine", %player, %to, "teleport target is off the board");
            return Ok(());
        }
        let from = std::mem::replace(&mut self.player_mut(player)?.landing, to.clone());
        self.state.turn.selected_player = Some(player);
        self.emit(GameEvent::Teleported {
            player,
            from,
            to: to.clone(),
        });
        self.dispatch_arrival(to, true)
    }

    pub(super) fn prompt_player_selection(&mut self, player: PlayerId) -> Result<(), EngineError> {
        let candidates: Vec<PlayerId> = self
            .state
            .player_ids()
            .into_iter()
            .filter(|id| *id != player)
            .collect();
        if candidates.is_empty() {
            debug!(target: "trails::engine", %player, "nobody to swap with");
            return Ok(());
        }
        self.state.turn.prompt = Some(Prompt::PlayerSelection { player, candidates });
        Ok(())
    }

    pub(super) fn swap_positions(
        &mut self,
        player: PlayerId,
        other: PlayerId,
    ) -> Result<(), EngineError> {
        let mine = self.player(player)?.landing.clone();
        let theirs = self.player(other)?.landing.clone();
        self.player_mut(player)?.landing = theirs.clone();
        self.player_mut(other)?.landing = mine;

        self.state.turn.selected_player = Some(player);
        self.emit(GameEvent::PositionsSwapped { player, other });
        self.dispatch_arrival(theirs, true)
    }
}
