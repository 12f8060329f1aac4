//! Turn orchestration.
//!
//! [`GameEngine`] is the only writer of [`GameState`]. It is driven by
//! [`GameEngine::tick`] and suspends whenever it needs outside input,
//! reporting the pending [`Prompt`]. Inputs are handed back through the
//! `submit_*` methods; everything else (movement, tile effects, turn
//! hand-over) happens inside ticks so a match replays identically from the
//! same seed and the same inputs.

mod effects;
mod errors;
mod inputs;
mod moving;
mod turns;

pub use errors::EngineError;

use tracing::trace;

use crate::env::{GameEnv, RollContext, compute_seed};
use crate::event::GameEvent;
use crate::state::{
    GameState, MatchOutcome, PendingStep, PlayerId, PlayerState, Prompt, StateError, TurnPhase,
};

/// Result of a single engine tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickStatus {
    /// Work was done; tick again.
    Progressed,
    /// Blocked until the prompt is answered.
    Waiting(Prompt),
    /// The match has ended.
    Finished(MatchOutcome),
}

pub struct GameEngine<'a> {
    state: &'a mut GameState,
    env: GameEnv<'a>,
    events: Vec<GameEvent>,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState, env: GameEnv<'a>) -> Self {
        Self {
            state,
            env,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    pub fn current_player(&self) -> PlayerId {
        self.state.turn.current_player
    }

    pub fn phase(&self) -> TurnPhase {
        self.state.turn.phase
    }

    pub fn outcome(&self) -> MatchOutcome {
        self.state.turn.outcome
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.state.turn.prompt.as_ref()
    }

    /// Drains the events buffered since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advances the match by one tick.
    pub fn tick(&mut self) -> Result<TickStatus, EngineError> {
        if self.state.is_over() {
            return Ok(TickStatus::Finished(self.state.turn.outcome));
        }
        if let Some(prompt) = &self.state.turn.prompt {
            return Ok(TickStatus::Waiting(prompt.clone()));
        }
        if self.state.turn.pause_ticks > 0 {
            self.state.turn.pause_ticks -= 1;
            return Ok(TickStatus::Progressed);
        }
        if let Some(mover) = self.state.turn.moving {
            self.tick_movement(mover)?;
            return Ok(self.status());
        }

        match self.state.turn.phase {
            TurnPhase::AwaitingRoll => {
                let player = self.state.turn.current_player;
                self.state.turn.prompt = Some(Prompt::Roll { player });
            }
            TurnPhase::Rolling | TurnPhase::Moving | TurnPhase::ResolvingEffect => {
                match self.state.turn.pending.pop_front() {
                    Some(step) => self.run_step(step)?,
                    None => self.complete_resolution(),
                }
            }
            TurnPhase::AdvancingTurn => self.advance_turn()?,
        }
        Ok(self.status())
    }

    /// Ticks until input is needed, the match ends, or `max_ticks` elapse.
    pub fn run_until_prompt(&mut self, max_ticks: u32) -> Result<TickStatus, EngineError> {
        for _ in 0..max_ticks {
            match self.tick()? {
                TickStatus::Progressed => continue,
                status => return Ok(status),
            }
        }
        Ok(self.status())
    }

    fn status(&self) -> TickStatus {
        if self.state.is_over() {
            return TickStatus::Finished(self.state.turn.outcome);
        }
        match &self.state.turn.prompt {
            Some(prompt) => TickStatus::Waiting(prompt.clone()),
            None => TickStatus::Progressed,
        }
    }

    fn run_step(&mut self, step: PendingStep) -> Result<(), EngineError> {
        trace!(target: "trails::engine", ?step, "running pending step");
        match step {
            PendingStep::Move { player, request } => self.start_movement(player, request),
            PendingStep::Teleport { player, to } => self.teleport(player, to),
            PendingStep::ChoosePlayer { player } => self.prompt_player_selection(player),
            PendingStep::Reward { player, reward } => self.apply_reward(player, reward),
        }
    }

    fn emit(&mut self, event: GameEvent) {
        trace!(target: "trails::engine", event = event.name(), "emit");
        self.events.push(event);
    }

    /// Seed for the next random draw. Every draw advances the nonce.
    fn next_seed(&mut self, player: PlayerId, context: RollContext) -> u64 {
        let seed = compute_seed(
            self.state.game_seed,
            self.state.nonce,
            u32::from(player.0),
            context,
        );
        self.state.nonce += 1;
        seed
    }

    fn ensure_in_progress(&self) -> Result<(), EngineError> {
        if self.state.is_over() {
            return Err(EngineError::MatchOver(self.state.turn.outcome));
        }
        Ok(())
    }

    fn unexpected(&self, expected: &'static str) -> EngineError {
        let actual = match &self.state.turn.prompt {
            Some(prompt) => prompt.kind(),
            None => self.state.turn.phase.into(),
        };
        EngineError::UnexpectedInput { expected, actual }
    }

    fn player(&self, id: PlayerId) -> Result<&PlayerState, EngineError> {
        self.state
            .player(id)
            .ok_or(EngineError::State(StateError::UnknownPlayer(id)))
    }

    fn player_mut(&mut self, id: PlayerId) -> Result<&mut PlayerState, EngineError> {
        self.state
            .player_mut(id)
            .ok_or(EngineError::State(StateError::UnknownPlayer(id)))
    }
}
