//! SQLite schema creation and versioning.

use std::path::Path;

use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database schema version {found} is newer than supported version {expected}")]
    VersionMismatch { expected: i32, found: i32 },
}

/// Schema version written by this build.
pub const CURRENT_VERSION: i32 = 1;

/// The four data tables, in parent-first order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Location,
    Episode,
    Character,
    CharacterInEpisode,
}

impl Table {
    /// Parent-first order: every table only references tables before it.
    pub const ALL: [Table; 4] = [
        Self::Location,
        Self::Episode,
        Self::Character,
        Self::CharacterInEpisode,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::Episode => "episode",
            Self::Character => "character",
            Self::CharacterInEpisode => "character_in_episode",
        }
    }

    /// Quoted identifier for use in SQL text.
    pub fn ident(&self) -> String {
        format!("\"{}\"", self.name())
    }
}

/// Create the bookkeeping and data tables, then stamp [`CURRENT_VERSION`].
///
/// Running it again on an up-to-date database changes nothing.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    if stored_version(conn)? < CURRENT_VERSION {
        record_version(conn, CURRENT_VERSION)?;
    }
    Ok(())
}

/// Open or create a database at the given path.
///
/// Parent directories are created as needed. Foreign keys are enforced on
/// the returned connection.
pub fn open_database(path: &Path) -> Result<Connection, SchemaError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    conn.pragma_update(None, "foreign_keys", true)?;

    let version = stored_version(&conn)?;
    if version > CURRENT_VERSION {
        return Err(SchemaError::VersionMismatch {
            found: version,
            expected: CURRENT_VERSION,
        });
    }
    if version < CURRENT_VERSION {
        log::debug!(
            "Creating schema v{} in {} (found v{})",
            CURRENT_VERSION,
            path.display(),
            version
        );
        create_schema(&conn)?;
    }

    Ok(conn)
}

/// In-memory database with foreign keys on and the schema created.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.pragma_update(None, "foreign_keys", true)?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Highest recorded schema version; 0 for a fresh file.
fn stored_version(conn: &Connection) -> Result<i32, SchemaError> {
    let has_table: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'schema_version'",
        [],
        |row| row.get(0),
    )?;
    if has_table == 0 {
        return Ok(0);
    }

    let version = conn
        .query_row("SELECT MAX(version) FROM schema_version", [], |row| {
            row.get::<_, Option<i32>>(0)
        })?
        .unwrap_or(0);
    Ok(version)
}

fn record_version(conn: &Connection, version: i32) -> Result<(), SchemaError> {
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS "location" (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    type TEXT,
    dimension TEXT
);

CREATE TABLE IF NOT EXISTS "episode" (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    air_date TEXT NOT NULL,
    episode_code TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS "character" (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    status TEXT,
    species TEXT,
    type TEXT,
    gender TEXT,
    origin_id INTEGER NOT NULL REFERENCES "location"(id),
    location_id INTEGER NOT NULL REFERENCES "location"(id)
);
CREATE INDEX IF NOT EXISTS idx_character_origin ON "character"(origin_id);
CREATE INDEX IF NOT EXISTS idx_character_location ON "character"(location_id);

-- No uniqueness on the pair: the source may list an episode twice.
CREATE TABLE IF NOT EXISTS "character_in_episode" (
    character_id INTEGER NOT NULL REFERENCES "character"(id),
    episode_id INTEGER NOT NULL REFERENCES "episode"(id)
);
CREATE INDEX IF NOT EXISTS idx_cie_character ON "character_in_episode"(character_id);
CREATE INDEX IF NOT EXISTS idx_cie_episode ON "character_in_episode"(episode_id);
"#;
