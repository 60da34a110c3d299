//! Full-replace synchronization of the API listings into the database.
//!
//! [`Synchronizer::run_full_sync`] resets the store, then fetches and loads
//! locations, episodes and characters in that order, all inside a single
//! transaction that is committed once or rolled back once.

pub mod error;
pub mod loader;
pub mod progress;
pub mod stage;
pub mod sync;

pub use error::SyncError;
pub use loader::{
    LoadCounts, LoadOptions, load_characters_and_associations, load_episodes, load_locations,
};
pub use progress::{LogProgress, SilentProgress, SyncProgress};
pub use stage::{SyncOutcome, SyncReport, SyncStage};
pub use sync::{SyncOptions, Synchronizer};
