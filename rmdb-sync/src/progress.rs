//! Sync progress reporting.

use rmdb_catalog::ResourceKind;

use crate::stage::{SyncReport, SyncStage};

/// Trait for receiving sync progress updates.
pub trait SyncProgress {
    /// Called on every stage transition, including the terminal one.
    fn on_stage(&self, stage: SyncStage);

    /// Called once a listing has been fetched in full.
    fn on_fetched(&self, kind: ResourceKind, records: usize);

    /// Called after a listing has been inserted.
    fn on_loaded(&self, kind: ResourceKind, rows: u64);

    /// Called when the run is over, committed or not.
    fn on_complete(&self, report: &SyncReport);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl SyncProgress for SilentProgress {
    fn on_stage(&self, _stage: SyncStage) {}
    fn on_fetched(&self, _kind: ResourceKind, _records: usize) {}
    fn on_loaded(&self, _kind: ResourceKind, _rows: u64) {}
    fn on_complete(&self, _report: &SyncReport) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl SyncProgress for LogProgress {
    fn on_stage(&self, stage: SyncStage) {
        log::info!("Sync: {}", stage);
    }

    fn on_fetched(&self, kind: ResourceKind, records: usize) {
        log::info!("  Fetched {} {}", records, kind.plural());
    }

    fn on_loaded(&self, kind: ResourceKind, rows: u64) {
        log::info!("  Inserted {} {}", rows, kind.plural());
    }

    fn on_complete(&self, report: &SyncReport) {
        if report.is_success() {
            log::info!("{}", report.summary());
        } else {
            log::error!("{}", report.summary());
        }
    }
}
