//! Bulk insertion of decoded records through the database procedures.
//!
//! Each loader prepares its procedures once and executes them once per
//! record. The first failing insert aborts the call; nothing is retried or
//! skipped. Loaders never commit: they run inside the caller's transaction.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::ops::AddAssign;

use rmdb_catalog::{CharacterRecord, EpisodeRecord, LocationRecord};
use rmdb_db::{ProcedureCall, procedures};
use rusqlite::Connection;

use crate::error::SyncError;
use crate::stage::SyncStage;

/// Rows inserted, per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadCounts {
    pub locations: u64,
    pub episodes: u64,
    pub characters: u64,
    pub associations: u64,
}

impl AddAssign for LoadCounts {
    fn add_assign(&mut self, other: Self) {
        self.locations += other.locations;
        self.episodes += other.episodes;
        self.characters += other.characters;
        self.associations += other.associations;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Insert each `(character, episode)` pair at most once per character.
    /// Off by default: repeated episode URLs produce repeated rows.
    pub dedupe_associations: bool,
}

/// Insert every location with `add_location`.
pub fn load_locations<I>(conn: &Connection, locations: I) -> Result<LoadCounts, SyncError>
where
    I: IntoIterator,
    I::Item: Borrow<LocationRecord>,
{
    let stage = SyncStage::LoadingLocations;
    let mut call = ProcedureCall::prepare(conn)
        .map_err(|e| SyncError::load_failed(stage, None, e))?;

    for location in locations {
        let location = location.borrow();
        procedures::add_location(&mut call, location)
            .map_err(|e| SyncError::load_failed(stage, Some(location.id), e))?;
    }

    Ok(LoadCounts {
        locations: call.executions(),
        ..LoadCounts::default()
    })
}

/// Insert every episode with `add_episode`.
pub fn load_episodes<I>(conn: &Connection, episodes: I) -> Result<LoadCounts, SyncError>
where
    I: IntoIterator,
    I::Item: Borrow<EpisodeRecord>,
{
    let stage = SyncStage::LoadingEpisodes;
    let mut call = ProcedureCall::prepare(conn)
        .map_err(|e| SyncError::load_failed(stage, None, e))?;

    for episode in episodes {
        let episode = episode.borrow();
        procedures::add_episode(&mut call, episode)
            .map_err(|e| SyncError::load_failed(stage, Some(episode.id), e))?;
    }

    Ok(LoadCounts {
        episodes: call.executions(),
        ..LoadCounts::default()
    })
}

/// Insert every character, each followed by its episode associations.
///
/// Locations and episodes must already be loaded; a character or
/// association referencing a missing row fails on the foreign key.
pub fn load_characters_and_associations<I>(
    conn: &Connection,
    characters: I,
    options: LoadOptions,
) -> Result<LoadCounts, SyncError>
where
    I: IntoIterator,
    I::Item: Borrow<CharacterRecord>,
{
    let stage = SyncStage::LoadingCharacters;
    let mut add_character = ProcedureCall::prepare(conn)
        .map_err(|e| SyncError::load_failed(stage, None, e))?;
    let mut add_association = ProcedureCall::prepare(conn)
        .map_err(|e| SyncError::load_failed(stage, None, e))?;

    let mut seen = HashSet::new();
    for character in characters {
        let character = character.borrow();
        procedures::add_character(&mut add_character, character)
            .map_err(|e| SyncError::load_failed(stage, Some(character.id), e))?;

        seen.clear();
        for association in character.associations() {
            if options.dedupe_associations && !seen.insert(association.episode_id) {
                log::debug!(
                    "Skipping repeated episode {} for character {}",
                    association.episode_id,
                    character.id
                );
                continue;
            }
            procedures::add_character_in_episode(&mut add_association, association)
                .map_err(|e| SyncError::load_failed(stage, Some(character.id), e))?;
        }
    }

    Ok(LoadCounts {
        characters: add_character.executions(),
        associations: add_association.executions(),
        ..LoadCounts::default()
    })
}
