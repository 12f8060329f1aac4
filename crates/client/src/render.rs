//! Prints match events to the terminal.

use std::collections::HashMap;

use tokio::sync::broadcast::Receiver;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use trails_core::{GameEvent, GameState, PlayerId, ShieldSource};
use trails_runtime::{Event, EventBus, SessionEvent, Topic};

/// Display names by seat.
#[derive(Clone, Debug, Default)]
pub struct Names(HashMap<PlayerId, String>);

impl Names {
    pub fn from_state(state: &GameState) -> Self {
        Self(
            state
                .players()
                .map(|player| (player.id, player.profile.display_name.clone()))
                .collect(),
        )
    }

    pub fn get(&self, id: PlayerId) -> String {
        self.0.get(&id).cloned().unwrap_or_else(|| id.to_string())
    }
}

/// Streams match events to stdout until the match finishes or the bus closes.
///
/// Game topics are polled ahead of `Session`, so everything published
/// before `MatchFinished` is printed before the task ends.
pub fn spawn_renderer(bus: &EventBus, names: Names) -> JoinHandle<()> {
    let mut turn = bus.subscribe(Topic::Turn);
    let mut movement = bus.subscribe(Topic::Movement);
    let mut effect = bus.subscribe(Topic::Effect);
    let mut outcome = bus.subscribe(Topic::Outcome);
    let mut session = bus.subscribe(Topic::Session);

    tokio::spawn(async move {
        loop {
            let event = tokio::select! {
                biased;
                event = next(&mut turn) => event,
                event = next(&mut movement) => event,
                event = next(&mut effect) => event,
                event = next(&mut outcome) => event,
                event = next(&mut session) => event,
            };
            let Some(event) = event else {
                break;
            };
            if let Some(line) = describe(&event, &names) {
                println!("{line}");
            }
            if is_final(&event) {
                break;
            }
        }
    })
}

fn is_final(event: &Event) -> bool {
    matches!(event, Event::Session(SessionEvent::MatchFinished { .. }))
}

async fn next(rx: &mut Receiver<Event>) -> Option<Event> {
    loop {
        match rx.recv().await {
            Ok(event) => return Some(event),
            Err(RecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "renderer lagged");
            }
            Err(RecvError::Closed) => return None,
        }
    }
}

pub fn describe(event: &Event, names: &Names) -> Option<String> {
    let name = |id: PlayerId| names.get(id);
    let line = match event {
        Event::Game(event) => match event {
            GameEvent::DiceRollCompleted { player, roll } => {
                format!("🎲 {} rolled {}", name(*player), roll)
            }
            GameEvent::MovementFinished { player, landing, .. } => {
                format!("   {} stops at {}", name(*player), landing)
            }
            GameEvent::RouteChosen { player, route } => match route {
                Some(route) => format!("   {} turns onto {}", name(*player), route.entry()),
                None => format!("   {} stays on the path", name(*player)),
            },
            GameEvent::Teleported { player, to, .. } => {
                format!("   {} is moved to {}", name(*player), to)
            }
            GameEvent::PositionsSwapped { player, other } => {
                format!("   {} swaps places with {}", name(*player), name(*other))
            }
            GameEvent::QuestionAnswered {
                player,
                difficulty,
                correct,
            } => format!(
                "   {} answered a {} question {}",
                name(*player),
                difficulty,
                if *correct { "correctly" } else { "incorrectly" }
            ),
            GameEvent::QuestionSkipped { player } => {
                format!("   {} skips the question", name(*player))
            }
            GameEvent::RetryGranted { player } => {
                format!("   {} gets a second try", name(*player))
            }
            GameEvent::RewardApplied { player, reward } => {
                format!("   {} → {:?}", name(*player), reward)
            }
            GameEvent::CardDrawn { player, card } => format!(
                "🃏 {} draws {}: {}",
                name(*player),
                card.title(),
                card.description()
            ),
            GameEvent::GambleResolved { player, won } => format!(
                "   {} {} the gamble",
                name(*player),
                if *won { "wins" } else { "loses" }
            ),
            GameEvent::LivesChanged { player, lives, .. } => {
                format!("❤  {} now has {} lives", name(*player), lives)
            }
            GameEvent::ShieldAbsorbed { player, source } => format!(
                "🛡  {}'s {} absorbs the hit",
                name(*player),
                match source {
                    ShieldSource::Card => "shield card",
                    ShieldSource::Ability => "earth shield",
                }
            ),
            GameEvent::SkipTurnScheduled { player, pending } => {
                format!("   {} will sit out {} turn(s)", name(*player), pending)
            }
            GameEvent::TurnSkipped { player, .. } => {
                format!("   {} sits this turn out", name(*player))
            }
            GameEvent::ExtraTurnGranted { player } => {
                format!("   {} goes again", name(*player))
            }
            GameEvent::TurnAdvanced {
                to, turn_number, ..
            } => format!("── turn {}: {} ──", turn_number + 1, name(*to)),
            GameEvent::GameWon { player } => format!("🏆 {} wins the match!", name(*player)),
            GameEvent::GameLost { player } => {
                format!("💀 {} ran out of lives. Match over.", name(*player))
            }
            GameEvent::GameStalled { attempts } => {
                format!("⏸  Nobody can move after {} attempts. Match stalled.", attempts)
            }
            _ => return None,
        },
        Event::Session(SessionEvent::SnapshotFailed { turn, error }) => {
            format!("⚠  could not save turn {}: {}", turn, error)
        }
        Event::Prompt(_) | Event::Session(_) => return None,
    };
    Some(line)
}
