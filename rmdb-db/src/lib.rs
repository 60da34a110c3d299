//! SQLite persistence layer for the mirrored dataset.
//!
//! Provides schema creation, the four insertion procedures used by the sync
//! pipeline, the dependency-ordered schema reset, and read-only queries,
//! backed by SQLite (via rusqlite with bundled feature).

pub mod procedures;
pub mod queries;
pub mod reset;
pub mod schema;

pub use procedures::{
    OperationError, Procedure, ProcedureCall, ProcedureRow, add_character, add_character_in_episode,
    add_episode, add_location,
};
pub use queries::{
    CharacterRow, EpisodeRow, LocationRow, Snapshot, TableCounts, characters_without_episodes,
    episode_with_most_characters, locations_without_characters, search_characters,
    search_episodes, search_locations, snapshot, table_counts,
};
pub use reset::{clear_tables, reset, seed_unknown_location};
pub use schema::{SchemaError, Table, open_database, open_memory};
