//! Data-driven content definitions and loaders.
//!
//! This crate houses static game content and provides loaders for RON/TOML data files:
//! - Board layouts (paths, regions, intersection routes) via RON
//! - Question banks via RON
//! - Match rules via TOML
//!
//! Content is consumed by the runtime when a session is built and never
//! appears in game state.

pub mod layout;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use layout::{BoardLayout, BoardSetup, LayoutError, PathLayout, RegionBand, RouteLayout};

#[cfg(feature = "loaders")]
pub use loaders::{BoardLoader, ConfigLoader, Content, ContentFactory, QuestionLoader};
