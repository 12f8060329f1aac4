//! Simulation worker that owns the authoritative [`GameState`].
//!
//! Receives commands from [`crate::RuntimeHandle`], drives the
//! [`GameEngine`], and publishes what happened on the [`EventBus`].
//! Inputs run against a staged copy of the state and are committed only on
//! success, so a rejected input leaves the match untouched.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};
use trails_core::{
    EngineError, GameEngine, GameError, GameEvent, GameState, IntersectionChoice, PlayerId,
    QuestionResponse, TickStatus,
};

use crate::api::Result;
use crate::events::{Event, EventBus, PromptEvent, SessionEvent};
use crate::oracle::OracleManager;
use crate::repository::StateRepository;

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Tick until input is needed, the match ends, or the budget runs out.
    Advance {
        max_ticks: u32,
        reply: oneshot::Sender<Result<TickStatus>>,
    },
    /// Answer a roll prompt. `None` lets the engine roll.
    Roll {
        roll: Option<u32>,
        reply: oneshot::Sender<Result<u32>>,
    },
    ChooseRoute {
        choice: IntersectionChoice,
        reply: oneshot::Sender<Result<()>>,
    },
    Answer {
        response: QuestionResponse,
        reply: oneshot::Sender<Result<()>>,
    },
    SelectPlayer {
        choice: Option<PlayerId>,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Query the current game state (read-only).
    QueryState { reply: oneshot::Sender<GameState> },
}

/// Background task that processes gameplay commands.
pub struct SimulationWorker {
    state: GameState,
    oracles: OracleManager,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    snapshots: Option<Arc<dyn StateRepository>>,
    /// Turn number and finished flag of the last snapshot.
    last_saved: Option<(u64, bool)>,
    finish_reported: bool,
}

impl SimulationWorker {
    pub fn new(
        state: GameState,
        oracles: OracleManager,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        snapshots: Option<Arc<dyn StateRepository>>,
    ) -> Self {
        Self {
            state,
            oracles,
            command_rx,
            event_bus,
            snapshots,
            last_saved: None,
            finish_reported: false,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        self.persist();
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd);
                }
                else => break,
            }
        }
        debug!(target: "runtime::worker", turn = self.state.turn.turn_number, "simulation worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Advance { max_ticks, reply } => {
                let result = self.advance(max_ticks);
                let _ = reply.send(result);
            }
            Command::Roll { roll, reply } => {
                let result = self.apply("roll", |engine| match roll {
                    Some(roll) => engine.submit_roll(roll).map(|()| roll),
                    None => engine.roll(),
                });
                let _ = reply.send(result);
            }
            Command::ChooseRoute { choice, reply } => {
                let result =
                    self.apply("route", |engine| engine.submit_intersection_choice(choice));
                let _ = reply.send(result);
            }
            Command::Answer { response, reply } => {
                let result = self.apply("answer", |engine| engine.submit_answer(response));
                let _ = reply.send(result);
            }
            Command::SelectPlayer { choice, reply } => {
                let result = self.apply("selection", |engine| engine.submit_player_choice(choice));
                let _ = reply.send(result);
            }
            Command::QueryState { reply } => {
                let _ = reply.send(self.state.clone());
            }
        }
    }

    fn advance(&mut self, max_ticks: u32) -> Result<TickStatus> {
        let status = self.apply("advance", |engine| engine.run_until_prompt(max_ticks))?;
        if let TickStatus::Waiting(prompt) = &status {
            self.event_bus.publish(Event::Prompt(PromptEvent {
                turn: self.state.turn.turn_number,
                prompt: prompt.clone(),
            }));
        }
        Ok(status)
    }

    /// Runs `f` against a staged copy and commits it on success.
    fn apply<T>(
        &mut self,
        label: &'static str,
        f: impl FnOnce(&mut GameEngine<'_>) -> std::result::Result<T, EngineError>,
    ) -> Result<T> {
        let env = self.oracles.as_game_env();
        let mut staged = self.state.clone();
        let mut engine = GameEngine::new(&mut staged, env);

        match f(&mut engine) {
            Ok(value) => {
                let events = engine.take_events();
                self.state = staged;
                self.publish(events);
                self.persist();
                Ok(value)
            }
            Err(error) => {
                warn!(
                    target: "runtime::worker",
                    command = label,
                    code = error.error_code(),
                    severity = error.severity().as_str(),
                    %error,
                    "command rejected"
                );
                Err(error.into())
            }
        }
    }

    fn publish(&mut self, events: Vec<GameEvent>) {
        for event in events {
            self.event_bus.publish(Event::Game(event));
        }
        if self.state.is_over() && !self.finish_reported {
            self.finish_reported = true;
            self.event_bus
                .publish(Event::Session(SessionEvent::MatchFinished {
                    outcome: self.state.turn.outcome,
                    decided_by: self.state.turn.decided_by,
                    turns: self.state.turn.turn_number,
                }));
        }
    }

    /// Saves a snapshot at every turn boundary and once more when the match ends.
    fn persist(&mut self) {
        let Some(repo) = &self.snapshots else {
            return;
        };
        let turn = self.state.turn.turn_number;
        let key = (turn, self.state.is_over());
        if self.last_saved == Some(key) {
            return;
        }

        let event = match repo.save(turn, &self.state) {
            Ok(()) => {
                debug!(target: "runtime::worker", turn, "snapshot saved");
                SessionEvent::SnapshotSaved { turn }
            }
            Err(err) => {
                warn!(target: "runtime::worker", turn, error = %err, "snapshot failed");
                SessionEvent::SnapshotFailed {
                    turn,
                    error: err.to_string(),
                }
            }
        };
        self.last_saved = Some(key);
        self.event_bus.publish(Event::Session(event));
    }
}
