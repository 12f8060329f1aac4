//! Persistence for match snapshots and participant profiles.
//!
//! Snapshots are keyed by turn number so a match can be resumed from the
//! start of any completed turn. Profiles outlive matches and carry the
//! rating fed to the question generator.
mod error;
mod file;
mod memory;
mod profile;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::{FileProfileRepository, FileStateRepository};
pub use memory::{InMemoryProfileRepo, InMemoryStateRepo};
pub use profile::{Profile, RatingChange};
pub use traits::{ProfileRepository, StateRepository};
