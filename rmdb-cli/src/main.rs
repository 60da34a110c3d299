//! rmdb CLI
//!
//! Command-line interface for mirroring the Rick and Morty API into a local
//! SQLite database and querying the mirror.

mod cli_types;
mod commands;
mod error;
mod settings;
mod spinner;

use std::io::Write;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
pub(crate) use error::CliError;
use settings::{Overrides, Settings};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = Settings::load(Overrides {
        database: cli.db,
        api_url: cli.api_url,
    })?;

    match cli.command {
        Commands::Sync {
            strict_dates,
            dedupe_associations,
        } => commands::sync::run_sync(&settings, strict_dates, dedupe_associations, cli.quiet),
        Commands::Stats => commands::stats::run_stats(&settings),
        Commands::Search { target, term } => {
            commands::search::run_search(&settings, target, &term)
        }
        Commands::Query { query } => commands::query::run_query(&settings, query),
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config::run_config_show(&settings);
                Ok(())
            }
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
            ConfigAction::Init { force } => commands::config::run_config_init(force),
        },
    }
}

/// Install the logger.
///
/// Normal output goes through `log::info!` as bare lines on stdout.
/// `--quiet` keeps warnings and errors only; `--verbose` adds debug output
/// with timestamps and levels. `RUST_LOG` still applies on top.
fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        log::LevelFilter::Warn
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .target(env_logger::Target::Stdout);
    if verbose {
        builder.format_timestamp_millis();
    } else {
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    }
    builder.parse_default_env();
    let _ = builder.try_init();
}

/// Print an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}
