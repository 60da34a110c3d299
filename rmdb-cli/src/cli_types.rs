//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "rmdb")]
#[command(about = "Mirror the Rick and Morty API into a local database", long_about = None)]
pub(crate) struct Cli {
    /// Database file (overrides RMDB_DATABASE and settings.toml)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// API base URL (overrides RMDB_API_URL and settings.toml)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Replace the database contents with a fresh copy of the API
    Sync {
        /// Fail the sync on an unparseable episode air date instead of using today
        #[arg(long)]
        strict_dates: bool,

        /// Insert each character/episode pair at most once
        #[arg(long)]
        dedupe_associations: bool,
    },

    /// Show row counts of the local database
    Stats,

    /// Search by name (case-insensitive substring)
    Search {
        /// What to search
        target: SearchTarget,

        /// Text to look for in names
        term: String,
    },

    /// Run one of the canned reports
    Query {
        #[arg(value_enum)]
        query: QueryKind,
    },

    /// Inspect or create the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum SearchTarget {
    Characters,
    Locations,
    Episodes,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum QueryKind {
    /// Characters that appear in no episode
    OrphanCharacters,
    /// Locations no character comes from or lives in
    OrphanLocations,
    /// The episode with the most characters
    BusiestEpisode,
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show resolved settings and their sources
    Show,

    /// Print the settings file path
    Path,

    /// Write a settings file with the default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
