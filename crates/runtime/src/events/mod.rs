//! Topic-based event bus for runtime events.
//!
//! Engine events are routed to topics so consumers can subscribe only to
//! the parts of a match they render or record.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{PromptEvent, SessionEvent};
