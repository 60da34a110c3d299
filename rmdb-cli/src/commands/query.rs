use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::cli_types::QueryKind;
use crate::settings::Settings;

use super::{open_existing_database, or_dash};

pub(crate) fn run_query(settings: &Settings, query: QueryKind) -> Result<(), CliError> {
    let Some(conn) = open_existing_database(settings)? else {
        return Ok(());
    };
    let failed = |e: rmdb_db::OperationError| CliError::database(format!("Query failed: {}", e));

    match query {
        QueryKind::OrphanCharacters => {
            let rows = rmdb_db::characters_without_episodes(&conn).map_err(failed)?;
            log::info!(
                "{}",
                "Characters without episodes".if_supports_color(Stdout, |t| t.bold()),
            );
            for c in &rows {
                log::info!("  {:>5}  {}", c.id, c.name);
            }
            log::info!("  ({} total)", rows.len());
        }
        QueryKind::OrphanLocations => {
            let rows = rmdb_db::locations_without_characters(&conn).map_err(failed)?;
            log::info!(
                "{}",
                "Locations without characters".if_supports_color(Stdout, |t| t.bold()),
            );
            for l in &rows {
                log::info!("  {:>5}  {:<36} {}", l.id, l.name, or_dash(&l.dimension));
            }
            log::info!("  ({} total)", rows.len());
        }
        QueryKind::BusiestEpisode => match rmdb_db::episode_with_most_characters(&conn)
            .map_err(failed)?
        {
            Some((episode, characters)) => {
                log::info!(
                    "{} {} ({}, aired {}): {} characters",
                    episode.episode_code.if_supports_color(Stdout, |t| t.cyan()),
                    episode.name.if_supports_color(Stdout, |t| t.bold()),
                    episode.id,
                    episode.air_date,
                    characters,
                );
            }
            None => log::info!("No episodes in the database."),
        },
    }

    Ok(())
}
