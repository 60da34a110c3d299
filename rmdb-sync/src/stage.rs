//! Sync state machine and the report returned by a run.

use std::fmt;
use std::time::Duration;

use rmdb_catalog::ResourceKind;

use crate::error::SyncError;
use crate::loader::LoadCounts;

/// Where a sync run is, or where it ended.
///
/// Runs move strictly forward through
/// `Idle -> Resetting -> LoadingLocations -> LoadingEpisodes ->
/// LoadingCharacters -> Committed`; any non-terminal stage can drop to
/// `RolledBack`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncStage {
    Idle,
    Resetting,
    LoadingLocations,
    LoadingEpisodes,
    LoadingCharacters,
    Committed,
    RolledBack,
}

impl SyncStage {
    /// The stage that fetches and loads `kind`.
    pub fn loading(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Location => Self::LoadingLocations,
            ResourceKind::Episode => Self::LoadingEpisodes,
            ResourceKind::Character => Self::LoadingCharacters,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Committed | Self::RolledBack)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Resetting => "resetting",
            Self::LoadingLocations => "loading locations",
            Self::LoadingEpisodes => "loading episodes",
            Self::LoadingCharacters => "loading characters",
            Self::Committed => "committed",
            Self::RolledBack => "rolled back",
        }
    }
}

impl fmt::Display for SyncStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a run ended.
#[derive(Debug)]
pub enum SyncOutcome {
    Committed,
    /// The run failed in `stage`; every change was rolled back.
    Aborted { stage: SyncStage, error: SyncError },
}

/// Result of [`Synchronizer::run_full_sync`](crate::Synchronizer::run_full_sync).
#[derive(Debug)]
pub struct SyncReport {
    /// Final state of the run.
    pub stage_reached: SyncStage,
    pub outcome: SyncOutcome,
    /// Rows inserted by loads that completed. Discarded on rollback.
    pub counts: LoadCounts,
    pub elapsed: Duration,
    /// Set when the rollback itself failed.
    pub rollback_error: Option<String>,
}

impl SyncReport {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, SyncOutcome::Committed)
    }

    /// True when the run aborted and its rollback went through, so the
    /// store holds exactly what it held before the run.
    pub fn left_store_unchanged(&self) -> bool {
        !self.is_success() && self.rollback_error.is_none()
    }

    pub fn error(&self) -> Option<&SyncError> {
        match &self.outcome {
            SyncOutcome::Committed => None,
            SyncOutcome::Aborted { error, .. } => Some(error),
        }
    }

    /// One-paragraph human-readable summary.
    pub fn summary(&self) -> String {
        let secs = self.elapsed.as_secs_f64();
        match &self.outcome {
            SyncOutcome::Committed => format!(
                "Sync committed in {:.1}s: {} locations, {} episodes, {} characters, {} associations",
                secs,
                self.counts.locations,
                self.counts.episodes,
                self.counts.characters,
                self.counts.associations,
            ),
            SyncOutcome::Aborted { stage, error } => {
                let mut text = format!(
                    "Sync aborted while {} after {:.1}s: {}",
                    stage, secs, error
                );
                if let Some(rollback) = &self.rollback_error {
                    text.push_str(&format!(" (rollback also failed: {})", rollback));
                }
                text
            }
        }
    }
}
