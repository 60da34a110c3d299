//! Terminal spinner that follows a sync run.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use rmdb_catalog::ResourceKind;
use rmdb_sync::{SyncProgress, SyncReport, SyncStage};

/// A single spinner line showing the current sync stage.
///
/// Log lines emitted through it are printed above the spinner.
pub(crate) struct SyncSpinner {
    pb: ProgressBar,
}

impl SyncSpinner {
    /// When `quiet` is true the spinner is hidden.
    pub(crate) fn new(quiet: bool) -> Self {
        let pb = ProgressBar::new_spinner();
        if quiet {
            pb.set_draw_target(ProgressDrawTarget::hidden());
        }
        let style = ProgressStyle::with_template("  {spinner:.cyan} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("/-\\|");
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb }
    }
}

impl SyncProgress for SyncSpinner {
    fn on_stage(&self, stage: SyncStage) {
        if stage.is_terminal() {
            self.pb.finish_and_clear();
        } else {
            self.pb.set_message(format!("{}...", capitalize(stage.as_str())));
        }
    }

    fn on_fetched(&self, kind: ResourceKind, records: usize) {
        self.pb.set_message(format!("Inserting {} {}...", records, kind.plural()));
    }

    fn on_loaded(&self, kind: ResourceKind, rows: u64) {
        self.pb
            .suspend(|| log::info!("  Loaded {:>6} {}", rows, kind.plural()));
    }

    fn on_complete(&self, _report: &SyncReport) {
        self.pb.finish_and_clear();
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
