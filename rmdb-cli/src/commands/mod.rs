pub(crate) mod config;
pub(crate) mod query;
pub(crate) mod search;
pub(crate) mod stats;
pub(crate) mod sync;

use rusqlite::Connection;

use crate::CliError;
use crate::settings::Settings;

/// Open the configured database for reading.
///
/// Returns `None` (after telling the user) when no sync has created it yet.
pub(crate) fn open_existing_database(settings: &Settings) -> Result<Option<Connection>, CliError> {
    let db_path = &settings.database.value;
    if !db_path.exists() {
        log::warn!("No database found at {}", db_path.display());
        log::info!("Run 'rmdb sync' to create one.");
        return Ok(None);
    }

    rmdb_db::open_database(db_path)
        .map(Some)
        .map_err(|e| CliError::database(format!("Failed to open database: {}", e)))
}

/// Truncate a string to a maximum width, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max).collect()
    }
}

/// Display form of an optional text column.
pub(crate) fn or_dash(value: &Option<String>) -> &str {
    match value.as_deref() {
        Some("") | None => "-",
        Some(v) => v,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate_str("Rick Sanchez", 20), "Rick Sanchez");
        assert_eq!(truncate_str("Abradolf Lincler", 10), "Abradol...");
        assert_eq!(truncate_str("Señor Pickle", 7), "Seño...");
    }

    #[test]
    fn empty_columns_show_a_dash() {
        assert_eq!(or_dash(&None), "-");
        assert_eq!(or_dash(&Some(String::new())), "-");
        assert_eq!(or_dash(&Some("Planet".to_string())), "Planet");
    }
}
