//! Reference provider implementations.
//!
//! - [`BotProvider`]: seeded automated participant
//! - [`QuestionBank`]: rating-aware question rotation over a fixed bank

mod bot;
mod questions;

pub use bot::BotProvider;
pub use questions::{DifficultyBands, QuestionBank};
