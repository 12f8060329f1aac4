//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive a match. Prompts the
//! engine raises are answered by the participant's [`InputProvider`] from the
//! [`ProviderRegistry`].

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use trails_core::{GameState, MatchOutcome, PlayerState, Prompt, TickStatus};

use crate::api::{
    AnswerChoice, InputProvider, ProviderKind, ProviderRegistry, QuestionProvider, Result,
    RuntimeError, RuntimeHandle,
};
use crate::events::EventBus;
use crate::oracle::OracleManager;
use crate::repository::{ProfileRepository, StateRepository};
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Tick budget of a single [`Runtime::step`].
    pub max_ticks_per_step: u32,
}

impl RuntimeConfig {
    pub const DEFAULT_MAX_TICKS_PER_STEP: u32 = 10_000;

    /// Defaults overridden by `TRAILS_EVENT_BUFFER`, `TRAILS_COMMAND_BUFFER`
    /// and `TRAILS_MAX_TICKS`. Unparsable values are ignored.
    pub fn from_env() -> Self {
        fn read<T: std::str::FromStr>(key: &str) -> Option<T> {
            std::env::var(key).ok()?.parse().ok()
        }

        let defaults = Self::default();
        Self {
            event_buffer_size: read("TRAILS_EVENT_BUFFER").unwrap_or(defaults.event_buffer_size),
            command_buffer_size: read("TRAILS_COMMAND_BUFFER")
                .unwrap_or(defaults.command_buffer_size),
            max_ticks_per_step: read("TRAILS_MAX_TICKS").unwrap_or(defaults.max_ticks_per_step),
        }
    }

    /// Platform data directory for snapshots and profiles.
    pub fn default_data_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "trails", "trails")
            .map(|dirs| dirs.data_dir().to_path_buf())
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 100,
            command_buffer_size: 32,
            max_ticks_per_step: Self::DEFAULT_MAX_TICKS_PER_STEP,
        }
    }
}

/// Main runtime that orchestrates a match.
///
/// Runtime owns the worker and answers prompts through the registry.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    config: RuntimeConfig,
    handle: RuntimeHandle,
    providers: ProviderRegistry,
    profiles: Option<Arc<dyn ProfileRepository>>,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    pub fn providers(&self) -> &ProviderRegistry {
        &self.providers
    }

    pub fn providers_mut(&mut self) -> &mut ProviderRegistry {
        &mut self.providers
    }

    /// Advances to the next prompt and answers it.
    ///
    /// Returns the outcome once the match has ended.
    pub async fn step(&mut self) -> Result<Option<MatchOutcome>> {
        match self.handle.advance(self.config.max_ticks_per_step).await? {
            TickStatus::Finished(outcome) => Ok(Some(outcome)),
            TickStatus::Progressed => {
                debug!(target: "runtime", "tick budget spent without reaching a prompt");
                Ok(None)
            }
            TickStatus::Waiting(prompt) => {
                self.resolve(prompt).await?;
                Ok(None)
            }
        }
    }

    /// Plays the match to the end and records the result on stored profiles.
    /// Every participant shares a win; any other outcome counts as a loss.
    pub async fn run(&mut self) -> Result<MatchOutcome> {
        loop {
            if let Some(outcome) = self.step().await? {
                let state = self.handle.query_state().await?;
                info!(
                    target: "runtime",
                    %outcome,
                    decided_by = ?state.turn.decided_by,
                    turns = state.turn.turn_number,
                    "match finished"
                );
                self.record_match(&state)?;
                return Ok(outcome);
            }
        }
    }

    async fn resolve(&self, prompt: Prompt) -> Result<()> {
        let state = self.handle.query_state().await?;
        let id = prompt.player();
        let player = state
            .player(id)
            .cloned()
            .ok_or(RuntimeError::UnknownPlayer(id))?;
        let provider = self.providers.get(id)?;

        match prompt {
            Prompt::Roll { .. } => {
                let roll = provider.roll(&player, &state).await?;
                self.handle.roll(roll).await?;
            }
            Prompt::IntersectionChoice {
                at, destinations, ..
            } => {
                let choice = provider.choose_route(&player, &at, &destinations).await?;
                self.handle.choose_route(choice).await?;
            }
            Prompt::Question { can_skip, .. } => {
                let questions = self.providers.questions()?;
                self.ask(provider.as_ref(), questions.as_ref(), &player, can_skip)
                    .await?;
            }
            Prompt::PlayerSelection { candidates, .. } => {
                let choice = provider.choose_player(&player, &candidates, &state).await?;
                self.handle.select_player(choice).await?;
            }
        }
        Ok(())
    }

    async fn ask(
        &self,
        provider: &dyn InputProvider,
        questions: &dyn QuestionProvider,
        player: &PlayerState,
        can_skip: bool,
    ) -> Result<()> {
        let question = questions.generate(player).await?;
        match provider.answer(player, &question, can_skip).await? {
            AnswerChoice::Skip => {
                self.handle
                    .answer(trails_core::QuestionResponse::Skipped)
                    .await
            }
            AnswerChoice::Answer(answer) => {
                let response = question.respond(&answer);
                self.handle.answer(response).await?;
                let delta = questions
                    .record_answer(player, &question, question.is_correct(&answer))
                    .await?;
                debug!(target: "runtime", player = %player.id, delta, "answer recorded");
                Ok(())
            }
        }
    }

    fn record_match(&self, state: &GameState) -> Result<()> {
        let Some(profiles) = &self.profiles else {
            return Ok(());
        };
        // A win is shared by the whole table.
        let won = state.turn.outcome == MatchOutcome::Won;
        for player in state.players() {
            if profiles.get(&player.profile.id)?.is_none() {
                continue;
            }
            profiles.record_match(&player.profile.id, won)?;
        }
        Ok(())
    }

    /// Shutdown the runtime gracefully
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    state: Option<GameState>,
    oracles: Option<OracleManager>,
    providers: ProviderRegistry,
    snapshots: Option<Arc<dyn StateRepository>>,
    profiles: Option<Arc<dyn ProfileRepository>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            state: None,
            oracles: None,
            providers: ProviderRegistry::new(),
            snapshots: None,
            profiles: None,
        }
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn initial_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Register the provider for `kind`.
    pub fn provider(mut self, kind: ProviderKind, provider: impl InputProvider + 'static) -> Self {
        self.providers.register(kind, provider);
        self
    }

    pub fn question_provider(mut self, provider: impl QuestionProvider + 'static) -> Self {
        self.providers.set_questions(Arc::new(provider));
        self
    }

    /// Replace the whole registry, bindings included.
    pub fn providers(mut self, providers: ProviderRegistry) -> Self {
        self.providers = providers;
        self
    }

    /// Persist a snapshot at every turn boundary. Without an initial state
    /// the latest stored snapshot is resumed.
    pub fn snapshots(mut self, repo: Arc<dyn StateRepository>) -> Self {
        self.snapshots = Some(repo);
        self
    }

    /// Record finished matches on stored profiles.
    pub fn profiles(mut self, repo: Arc<dyn ProfileRepository>) -> Self {
        self.profiles = Some(repo);
        self
    }

    pub async fn build(self) -> Result<Runtime> {
        let oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;

        let initial_state = match (self.state, &self.snapshots) {
            (Some(state), _) => state,
            (None, Some(repo)) => {
                let state = repo
                    .load_latest()?
                    .ok_or(RuntimeError::MissingInitialState)?;
                info!(target: "runtime", turn = state.turn.turn_number, "resuming from snapshot");
                state
            }
            (None, None) => return Err(RuntimeError::MissingInitialState),
        };

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let sim_worker = SimulationWorker::new(
            initial_state,
            oracles,
            command_rx,
            event_bus,
            self.snapshots,
        );
        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            config: self.config,
            handle,
            providers: self.providers,
            profiles: self.profiles,
            sim_worker_handle,
        })
    }
}
