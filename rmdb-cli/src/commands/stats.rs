use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::settings::Settings;

use super::open_existing_database;

pub(crate) fn run_stats(settings: &Settings) -> Result<(), CliError> {
    let Some(conn) = open_existing_database(settings)? else {
        return Ok(());
    };

    let counts = rmdb_db::table_counts(&conn)
        .map_err(|e| CliError::database(format!("Failed to count rows: {}", e)))?;

    log::info!(
        "{}",
        "Database Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", settings.database.value.display());
    crate::log_blank();
    log::info!("  Locations:      {:>8}", counts.locations);
    log::info!("  Episodes:       {:>8}", counts.episodes);
    log::info!("  Characters:     {:>8}", counts.characters);
    log::info!("  Appearances:    {:>8}", counts.associations);

    Ok(())
}
