//! The insertion procedures the sync pipeline writes through.
//!
//! Each procedure is a plain `INSERT`: a duplicate primary key or a dangling
//! foreign key is an error, never a silent upsert. A [`ProcedureCall`] wraps
//! one prepared statement so a loader can execute it once per record without
//! re-preparing, and is typed by the record it accepts.

use std::marker::PhantomData;

use rmdb_catalog::{Association, CharacterRecord, EpisodeRecord, LocationRecord};
use rusqlite::{Connection, Statement, params};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("{procedure} failed: {source}")]
    Procedure {
        procedure: Procedure,
        #[source]
        source: rusqlite::Error,
    },
    #[error("Failed to clear table '{table}': {source}")]
    Clear {
        table: &'static str,
        #[source]
        source: rusqlite::Error,
    },
}

/// Named insertion procedures, with the positional parameters listed in
/// each variant's SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Procedure {
    /// `add_location(id, name, type, dimension)`
    AddLocation,
    /// `add_episode(id, name, air_date, episode_code)`
    AddEpisode,
    /// `add_character(id, name, status, species, type, gender, origin_id, location_id)`
    AddCharacter,
    /// `add_character_in_episode(character_id, episode_id)`
    AddCharacterInEpisode,
}

impl Procedure {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddLocation => "add_location",
            Self::AddEpisode => "add_episode",
            Self::AddCharacter => "add_character",
            Self::AddCharacterInEpisode => "add_character_in_episode",
        }
    }

    pub fn sql(&self) -> &'static str {
        match self {
            Self::AddLocation => {
                r#"INSERT INTO "location" (id, name, type, dimension) VALUES (?1, ?2, ?3, ?4)"#
            }
            Self::AddEpisode => {
                r#"INSERT INTO "episode" (id, name, air_date, episode_code) VALUES (?1, ?2, ?3, ?4)"#
            }
            Self::AddCharacter => {
                r#"INSERT INTO "character" (id, name, status, species, type, gender, origin_id, location_id)
                   VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"#
            }
            Self::AddCharacterInEpisode => {
                r#"INSERT INTO "character_in_episode" (character_id, episode_id) VALUES (?1, ?2)"#
            }
        }
    }
}

impl std::fmt::Display for Procedure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A record type that one procedure inserts.
///
/// The binding ties each record type to its procedure, so a call prepared
/// for one procedure cannot be handed another procedure's rows.
pub trait ProcedureRow {
    const PROCEDURE: Procedure;

    /// Execute `stmt` with this record's positional parameters.
    fn execute_with(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize>;
}

impl ProcedureRow for LocationRecord {
    const PROCEDURE: Procedure = Procedure::AddLocation;

    fn execute_with(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
        stmt.execute(params![self.id, self.name, self.kind, self.dimension])
    }
}

impl ProcedureRow for EpisodeRecord {
    const PROCEDURE: Procedure = Procedure::AddEpisode;

    /// The air date is stored as `YYYY-MM-DD`.
    fn execute_with(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
        stmt.execute(params![
            self.id,
            self.name,
            self.air_date.format("%Y-%m-%d").to_string(),
            self.episode_code,
        ])
    }
}

impl ProcedureRow for CharacterRecord {
    const PROCEDURE: Procedure = Procedure::AddCharacter;

    /// Scalar and foreign-key fields only; the episode list goes through
    /// `add_character_in_episode`.
    fn execute_with(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
        stmt.execute(params![
            self.id,
            self.name,
            self.status,
            self.species,
            self.kind,
            self.gender,
            self.origin_id,
            self.location_id,
        ])
    }
}

impl ProcedureRow for Association {
    const PROCEDURE: Procedure = Procedure::AddCharacterInEpisode;

    fn execute_with(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
        stmt.execute(params![self.character_id, self.episode_id])
    }
}

/// A prepared procedure statement for rows of type `R`, reusable across
/// many executions.
///
/// The statement is finalized when the call is dropped. Passing a row of
/// another type does not compile:
///
/// ```compile_fail
/// use std::marker::PhantomData;
/// use rmdb_catalog::{EpisodeRecord, LocationRecord};
/// use rmdb_db::{ProcedureCall, add_location, open_memory};
///
/// let conn = open_memory().unwrap();
/// let mut call = ProcedureCall::<EpisodeRecord>::prepare(&conn).unwrap();
/// add_location(&mut call, &LocationRecord::unknown()).unwrap();
/// ```
pub struct ProcedureCall<'conn, R> {
    stmt: Statement<'conn>,
    executions: u64,
    _row: PhantomData<fn(&R)>,
}

impl<'conn, R: ProcedureRow> ProcedureCall<'conn, R> {
    /// Prepare `R`'s procedure on `conn` for repeated execution.
    pub fn prepare(conn: &'conn Connection) -> Result<Self, OperationError> {
        let stmt = conn
            .prepare(R::PROCEDURE.sql())
            .map_err(|source| OperationError::Procedure {
                procedure: R::PROCEDURE,
                source,
            })?;
        Ok(Self {
            stmt,
            executions: 0,
            _row: PhantomData,
        })
    }

    pub fn procedure(&self) -> Procedure {
        R::PROCEDURE
    }

    /// Number of successful executions so far.
    pub fn executions(&self) -> u64 {
        self.executions
    }

    /// Execute the procedure once for `row`.
    pub fn execute(&mut self, row: &R) -> Result<(), OperationError> {
        row.execute_with(&mut self.stmt)
            .map_err(|source| OperationError::Procedure {
                procedure: R::PROCEDURE,
                source,
            })?;
        self.executions += 1;
        Ok(())
    }
}

/// Run `add_location` for one record.
pub fn add_location(
    call: &mut ProcedureCall<'_, LocationRecord>,
    location: &LocationRecord,
) -> Result<(), OperationError> {
    call.execute(location)
}

/// Run `add_episode` for one record.
pub fn add_episode(
    call: &mut ProcedureCall<'_, EpisodeRecord>,
    episode: &EpisodeRecord,
) -> Result<(), OperationError> {
    call.execute(episode)
}

/// Run `add_character` for one record.
///
/// The episode list is not touched; see [`add_character_in_episode`].
pub fn add_character(
    call: &mut ProcedureCall<'_, CharacterRecord>,
    character: &CharacterRecord,
) -> Result<(), OperationError> {
    call.execute(character)
}

/// Run `add_character_in_episode` for one association.
pub fn add_character_in_episode(
    call: &mut ProcedureCall<'_, Association>,
    association: Association,
) -> Result<(), OperationError> {
    call.execute(&association)
}
