//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use strum::{EnumCount, EnumIter, IntoEnumIterator};
use tokio::sync::broadcast;
use trails_core::GameEvent;

use super::types::{PromptEvent, SessionEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize, EnumCount, EnumIter)]
pub enum Topic {
    /// Dice, prompts, and turn hand-over
    Turn,
    /// Token travel, teleports, and swaps
    Movement,
    /// Questions, cards, rewards, and lives
    Effect,
    /// Win, loss, or stall
    Outcome,
    /// Snapshots and match bookkeeping
    Session,
}

impl Topic {
    const fn index(self) -> usize {
        self as usize
    }
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Game(GameEvent),
    Prompt(PromptEvent),
    Session(SessionEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Game(event) => game_topic(event),
            Event::Prompt(_) => Topic::Turn,
            Event::Session(_) => Topic::Session,
        }
    }
}

fn game_topic(event: &GameEvent) -> Topic {
    use GameEvent::*;
    match event {
        DiceRollStarted { .. }
        | DiceRollCompleted { .. }
        | TurnAdvanced { .. }
        | TurnSkipped { .. }
        | ExtraTurnGranted { .. } => Topic::Turn,
        MovementStarted { .. }
        | WaypointReached { .. }
        | IntersectionReached { .. }
        | RouteChosen { .. }
        | MovementFinished { .. }
        | Teleported { .. }
        | PositionsSwapped { .. } => Topic::Movement,
        TileEffectSkipped { .. }
        | QuestionAsked { .. }
        | QuestionAnswered { .. }
        | QuestionSkipped { .. }
        | RetryGranted { .. }
        | RewardApplied { .. }
        | CardDrawn { .. }
        | GambleResolved { .. }
        | LivesChanged { .. }
        | ShieldGranted { .. }
        | ShieldAbsorbed { .. }
        | DirectionReversed { .. }
        | SkipTurnScheduled { .. }
        | TileEffectResolved { .. } => Topic::Effect,
        GameWon { .. } | GameLost { .. } | GameStalled { .. } => Topic::Outcome,
    }
}

/// Topic-based event bus
///
/// One broadcast channel per topic, created up front. Publishing never
/// blocks; events nobody listens to are dropped.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<[broadcast::Sender<Event>; Topic::COUNT]>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(std::array::from_fn(|_| broadcast::channel(capacity).0)),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels[topic.index()].send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels[topic.index()].subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }

    /// Subscribe to every topic
    pub fn subscribe_all(&self) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.subscribe_multiple(&Topic::iter().collect::<Vec<_>>())
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.channels[topic.index()].receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use trails_core::{Landing, MatchOutcome, PlayerId};

    use super::*;

    #[tokio::test]
    async fn events_reach_only_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut movement = bus.subscribe(Topic::Movement);
        let mut outcome = bus.subscribe(Topic::Outcome);

        bus.publish(Event::Game(GameEvent::Teleported {
            player: PlayerId(0),
            from: Landing::new("main", 3),
            to: Landing::new("main", 0),
        }));
        bus.publish(Event::Game(GameEvent::GameWon {
            player: PlayerId(1),
        }));

        assert!(matches!(
            movement.recv().await.unwrap(),
            Event::Game(GameEvent::Teleported { .. })
        ));
        assert!(matches!(
            outcome.recv().await.unwrap(),
            Event::Game(GameEvent::GameWon { .. })
        ));
        assert!(movement.try_recv().is_err());
    }

    #[test]
    fn session_events_route_to_session() {
        let event = Event::Session(SessionEvent::MatchFinished {
            outcome: MatchOutcome::Stalled,
            decided_by: None,
            turns: 9,
        });
        assert_eq!(event.topic(), Topic::Session);
        assert_eq!(EventBus::new().subscriber_count(Topic::Session), 0);
    }
}
