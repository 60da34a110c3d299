use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::cli_types::SearchTarget;
use crate::settings::Settings;

use super::{open_existing_database, or_dash, truncate_str};

pub(crate) fn run_search(
    settings: &Settings,
    target: SearchTarget,
    term: &str,
) -> Result<(), CliError> {
    let Some(conn) = open_existing_database(settings)? else {
        return Ok(());
    };
    let failed = |e: rmdb_db::OperationError| CliError::database(format!("Search failed: {}", e));

    let found = match target {
        SearchTarget::Characters => {
            let rows = rmdb_db::search_characters(&conn, term).map_err(failed)?;
            for c in &rows {
                log::info!(
                    "  {:>5}  {:<32} {:<10} {:<16} {}",
                    c.id.if_supports_color(Stdout, |t| t.dimmed()),
                    truncate_str(&c.name, 32),
                    or_dash(&c.status),
                    truncate_str(or_dash(&c.species), 16),
                    or_dash(&c.gender),
                );
            }
            rows.len()
        }
        SearchTarget::Locations => {
            let rows = rmdb_db::search_locations(&conn, term).map_err(failed)?;
            for l in &rows {
                log::info!(
                    "  {:>5}  {:<36} {:<16} {}",
                    l.id.if_supports_color(Stdout, |t| t.dimmed()),
                    truncate_str(&l.name, 36),
                    truncate_str(or_dash(&l.kind), 16),
                    or_dash(&l.dimension),
                );
            }
            rows.len()
        }
        SearchTarget::Episodes => {
            let rows = rmdb_db::search_episodes(&conn, term).map_err(failed)?;
            for e in &rows {
                log::info!(
                    "  {:>5}  {}  {}  {}",
                    e.id.if_supports_color(Stdout, |t| t.dimmed()),
                    e.episode_code.if_supports_color(Stdout, |t| t.cyan()),
                    e.air_date,
                    e.name,
                );
            }
            rows.len()
        }
    };

    if found == 0 {
        log::info!("No matches for '{}'.", term);
    } else {
        crate::log_blank();
        log::info!("{} match(es)", found);
    }
    Ok(())
}
