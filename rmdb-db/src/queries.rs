//! Read queries over the mirrored dataset.
//!
//! None of these take part in the sync pipeline.

use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::procedures::OperationError;
use crate::schema::Table;

// ── Row Types ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationRow {
    pub id: i64,
    pub name: String,
    pub kind: Option<String>,
    pub dimension: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeRow {
    pub id: i64,
    pub name: String,
    /// Stored as `YYYY-MM-DD`.
    pub air_date: String,
    pub episode_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterRow {
    pub id: i64,
    pub name: String,
    pub status: Option<String>,
    pub species: Option<String>,
    pub kind: Option<String>,
    pub gender: Option<String>,
    pub origin_id: i64,
    pub location_id: i64,
}

/// Row counts for the four data tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub locations: i64,
    pub episodes: i64,
    pub characters: i64,
    pub associations: i64,
}

/// Complete, ordered contents of the four data tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub locations: Vec<LocationRow>,
    pub episodes: Vec<EpisodeRow>,
    pub characters: Vec<CharacterRow>,
    /// `(character_id, episode_id)` pairs, sorted.
    pub associations: Vec<(i64, i64)>,
}

const LOCATION_COLUMNS: &str = "id, name, type, dimension";
const EPISODE_COLUMNS: &str = "id, name, air_date, episode_code";
const CHARACTER_COLUMNS: &str =
    "id, name, status, species, type, gender, origin_id, location_id";

fn row_to_location(row: &Row<'_>) -> rusqlite::Result<LocationRow> {
    Ok(LocationRow {
        id: row.get(0)?,
        name: row.get(1)?,
        kind: row.get(2)?,
        dimension: row.get(3)?,
    })
}

fn row_to_episode(row: &Row<'_>) -> rusqlite::Result<EpisodeRow> {
    Ok(EpisodeRow {
        id: row.get(0)?,
        name: row.get(1)?,
        air_date: row.get(2)?,
        episode_code: row.get(3)?,
    })
}

fn row_to_character(row: &Row<'_>) -> rusqlite::Result<CharacterRow> {
    Ok(CharacterRow {
        id: row.get(0)?,
        name: row.get(1)?,
        status: row.get(2)?,
        species: row.get(3)?,
        kind: row.get(4)?,
        gender: row.get(5)?,
        origin_id: row.get(6)?,
        location_id: row.get(7)?,
    })
}

// ── Statistics ──────────────────────────────────────────────────────────────

pub fn table_counts(conn: &Connection) -> Result<TableCounts, OperationError> {
    let count = |table: Table| -> Result<i64, OperationError> {
        let n = conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", table.ident()),
            [],
            |row| row.get(0),
        )?;
        Ok(n)
    };

    Ok(TableCounts {
        locations: count(Table::Location)?,
        episodes: count(Table::Episode)?,
        characters: count(Table::Character)?,
        associations: count(Table::CharacterInEpisode)?,
    })
}

/// The episode with the most association rows, with that count.
///
/// Ties go to the lowest episode id. `None` when no associations exist.
pub fn episode_with_most_characters(
    conn: &Connection,
) -> Result<Option<(EpisodeRow, i64)>, OperationError> {
    let result = conn
        .query_row(
            r#"SELECT e.id, e.name, e.air_date, e.episode_code, COUNT(*) AS total
               FROM "episode" e
               JOIN "character_in_episode" ce ON ce.episode_id = e.id
               GROUP BY e.id
               ORDER BY total DESC, e.id ASC
               LIMIT 1"#,
            [],
            |row| Ok((row_to_episode(row)?, row.get::<_, i64>(4)?)),
        )
        .optional()?;
    Ok(result)
}

// ── Search ──────────────────────────────────────────────────────────────────

fn like_pattern(term: &str) -> String {
    format!("%{}%", term.trim())
}

/// Characters whose name contains `term` (case-insensitive), by id.
pub fn search_characters(
    conn: &Connection,
    term: &str,
) -> Result<Vec<CharacterRow>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        r#"SELECT {CHARACTER_COLUMNS} FROM "character"
           WHERE LOWER(name) LIKE LOWER(?1) ORDER BY id"#
    ))?;
    let rows = stmt.query_map(params![like_pattern(term)], row_to_character)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Locations whose name contains `term` (case-insensitive), by id.
pub fn search_locations(
    conn: &Connection,
    term: &str,
) -> Result<Vec<LocationRow>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        r#"SELECT {LOCATION_COLUMNS} FROM "location"
           WHERE LOWER(name) LIKE LOWER(?1) ORDER BY id"#
    ))?;
    let rows = stmt.query_map(params![like_pattern(term)], row_to_location)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Episodes whose name contains `term` (case-insensitive), by id.
pub fn search_episodes(
    conn: &Connection,
    term: &str,
) -> Result<Vec<EpisodeRow>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        r#"SELECT {EPISODE_COLUMNS} FROM "episode"
           WHERE LOWER(name) LIKE LOWER(?1) ORDER BY id"#
    ))?;
    let rows = stmt.query_map(params![like_pattern(term)], row_to_episode)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Orphans ─────────────────────────────────────────────────────────────────

/// Characters with no association rows.
pub fn characters_without_episodes(
    conn: &Connection,
) -> Result<Vec<CharacterRow>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        r#"SELECT {CHARACTER_COLUMNS} FROM "character" c
           WHERE NOT EXISTS (
               SELECT 1 FROM "character_in_episode" ce WHERE ce.character_id = c.id
           )
           ORDER BY id"#
    ))?;
    let rows = stmt.query_map([], row_to_character)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Locations that are neither the origin nor the current location of any
/// character. Includes the sentinel when nothing points at it.
pub fn locations_without_characters(
    conn: &Connection,
) -> Result<Vec<LocationRow>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        r#"SELECT {LOCATION_COLUMNS} FROM "location" l
           WHERE NOT EXISTS (
               SELECT 1 FROM "character" c
               WHERE c.origin_id = l.id OR c.location_id = l.id
           )
           ORDER BY id"#
    ))?;
    let rows = stmt.query_map([], row_to_location)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Snapshot ────────────────────────────────────────────────────────────────

/// Read every row of the four data tables in a stable order.
pub fn snapshot(conn: &Connection) -> Result<Snapshot, OperationError> {
    let mut stmt = conn.prepare(&format!(
        r#"SELECT {LOCATION_COLUMNS} FROM "location" ORDER BY id"#
    ))?;
    let locations = stmt
        .query_map([], row_to_location)?
        .collect::<Result<Vec<_>, _>>()?;

    let mut stmt = conn.prepare(&format!(
        r#"SELECT {EPISODE_COLUMNS} FROM "episode" ORDER BY id"#
    ))?;
    let episodes = stmt
        .query_map([], row_to_episode)?
        .collect::<Result<Vec<_>, _>>()?;

    let mut stmt = conn.prepare(&format!(
        r#"SELECT {CHARACTER_COLUMNS} FROM "character" ORDER BY id"#
    ))?;
    let characters = stmt
        .query_map([], row_to_character)?
        .collect::<Result<Vec<_>, _>>()?;

    let mut stmt = conn.prepare(
        r#"SELECT character_id, episode_id FROM "character_in_episode"
           ORDER BY character_id, episode_id"#,
    )?;
    let associations = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Snapshot {
        locations,
        episodes,
        characters,
        associations,
    })
}
