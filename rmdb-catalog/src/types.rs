//! Data model types for the mirrored dataset.
//!
//! These are plain values: locations, episodes, characters, and the
//! character/episode association rows derived from them.

use std::fmt;

use chrono::NaiveDate;

/// Id of the sentinel location every unresolvable character reference points at.
pub const UNKNOWN_LOCATION_ID: i64 = 0;

/// Name of the sentinel location.
pub const UNKNOWN_LOCATION_NAME: &str = "unknown";

// ── Resource Kind ───────────────────────────────────────────────────────────

/// One of the three listing endpoints of the upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Location,
    Episode,
    Character,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::Episode => "episode",
            Self::Character => "character",
        }
    }

    /// Path segment of the listing endpoint (`{base}/{endpoint}?page=N`).
    pub fn endpoint(&self) -> &'static str {
        self.as_str()
    }

    pub fn plural(&self) -> &'static str {
        match self {
            Self::Location => "locations",
            Self::Episode => "episodes",
            Self::Character => "characters",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Records ─────────────────────────────────────────────────────────────────

/// A location as delivered by the API.
///
/// `kind` holds the API's `type` field. Decoded locations always carry
/// `Some` for `kind` and `dimension` (possibly `"unknown"` or empty); only
/// the sentinel stores `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationRecord {
    pub id: i64,
    pub name: String,
    pub kind: Option<String>,
    pub dimension: Option<String>,
}

impl LocationRecord {
    /// The sentinel `(0, "unknown", NULL, NULL)` row seeded after every reset.
    pub fn unknown() -> Self {
        Self {
            id: UNKNOWN_LOCATION_ID,
            name: UNKNOWN_LOCATION_NAME.to_string(),
            kind: None,
            dimension: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeRecord {
    pub id: i64,
    pub name: String,
    pub air_date: NaiveDate,
    /// Season/episode code such as `S01E01`. Not validated.
    pub episode_code: String,
}

/// A character with its foreign keys already resolved to ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterRecord {
    pub id: i64,
    pub name: String,
    pub status: String,
    pub species: String,
    /// The API's `type` field; usually empty.
    pub kind: String,
    pub gender: String,
    /// Origin location id, `UNKNOWN_LOCATION_ID` when unresolvable.
    pub origin_id: i64,
    /// Last known location id, `UNKNOWN_LOCATION_ID` when unresolvable.
    pub location_id: i64,
    /// Episodes in source order. Unparseable URLs appear as `0`.
    pub episode_ids: Vec<i64>,
}

impl CharacterRecord {
    /// Association rows for this character, in episode-list order.
    ///
    /// Repeated episode ids yield repeated associations.
    pub fn associations(&self) -> impl Iterator<Item = Association> + '_ {
        self.episode_ids.iter().map(move |&episode_id| Association {
            character_id: self.id,
            episode_id,
        })
    }
}

/// One row of the character/episode join table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Association {
    pub character_id: i64,
    pub episode_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn associations_keep_duplicates_and_order() {
        let character = CharacterRecord {
            id: 7,
            name: "Rick Sanchez".to_string(),
            status: "Alive".to_string(),
            species: "Human".to_string(),
            kind: String::new(),
            gender: "Male".to_string(),
            origin_id: 1,
            location_id: 3,
            episode_ids: vec![2, 1, 2],
        };
        let pairs: Vec<_> = character.associations().map(|a| a.episode_id).collect();
        assert_eq!(pairs, vec![2, 1, 2]);
        assert!(character.associations().all(|a| a.character_id == 7));
    }
}
