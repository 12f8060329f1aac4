//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! advancing the match, answering prompts, or streaming events from
//! specific topics.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};
use trails_core::{GameState, IntersectionChoice, PlayerId, QuestionResponse, TickStatus};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Ticks the engine until it needs input, the match ends, or `max_ticks` elapse.
    pub async fn advance(&self, max_ticks: u32) -> Result<TickStatus> {
        self.request(|reply| Command::Advance { max_ticks, reply })
            .await?
    }

    /// Answers a roll prompt and returns the sum used. `None` lets the engine roll.
    pub async fn roll(&self, roll: Option<u32>) -> Result<u32> {
        self.request(|reply| Command::Roll { roll, reply }).await?
    }

    pub async fn choose_route(&self, choice: IntersectionChoice) -> Result<()> {
        self.request(|reply| Command::ChooseRoute { choice, reply })
            .await?
    }

    pub async fn answer(&self, response: QuestionResponse) -> Result<()> {
        self.request(|reply| Command::Answer { response, reply })
            .await?
    }

    /// Answers a swap prompt. `None` lets the engine pick.
    pub async fn select_player(&self, choice: Option<PlayerId>) -> Result<()> {
        self.request(|reply| Command::SelectPlayer { choice, reply })
            .await?
    }

    /// Query the current game state (read-only snapshot)
    pub async fn query_state(&self) -> Result<GameState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// ```rust,ignore
    /// let mut outcome = handle.subscribe(Topic::Outcome);
    /// while let Ok(event) = outcome.recv().await {
    ///     // render the result
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
