use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use rmdb_api::{ApiClient, DecodeOptions};
use rmdb_catalog::AirDatePolicy;
use rmdb_sync::{LoadOptions, SyncOptions, SyncOutcome, Synchronizer};

use crate::CliError;
use crate::settings::Settings;
use crate::spinner::SyncSpinner;

pub(crate) fn run_sync(
    settings: &Settings,
    strict_dates: bool,
    dedupe_associations: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let db_path = &settings.database.value;
    let conn = rmdb_db::open_database(db_path)
        .map_err(|e| CliError::database(format!("Failed to open database: {}", e)))?;

    let client = ApiClient::new(settings.api_url.value.clone(), settings.timeout.value)
        .map_err(|e| CliError::api(format!("Failed to create HTTP client: {}", e)))?;

    let options = SyncOptions {
        decode: DecodeOptions {
            air_date_policy: if strict_dates {
                AirDatePolicy::Reject
            } else {
                AirDatePolicy::SubstituteToday
            },
        },
        load: LoadOptions {
            dedupe_associations,
        },
    };

    log::info!(
        "{}",
        "Full sync".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!(
        "  Source:   {}",
        client.base_url().if_supports_color(Stdout, |t| t.cyan())
    );
    log::info!(
        "  Database: {}",
        db_path.display().if_supports_color(Stdout, |t| t.cyan())
    );
    crate::log_blank();

    let spinner = SyncSpinner::new(quiet);
    let report = Synchronizer::with_options(client, options).run_full_sync(&conn, Some(&spinner));

    crate::log_blank();
    match &report.outcome {
        SyncOutcome::Committed => {
            log::info!(
                "{} {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                report.summary(),
            );
            Ok(())
        }
        SyncOutcome::Aborted { .. } => {
            if report.left_store_unchanged() {
                log::warn!("Database left unchanged.");
            } else {
                log::error!("Rollback failed; the database may be partially reset.");
            }
            Err(CliError::SyncAborted(report.summary()))
        }
    }
}
