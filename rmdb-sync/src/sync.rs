//! The full-sync orchestrator.

use std::time::Instant;

use rmdb_api::{DecodeOptions, PageSource, Resource, fetch_all};
use rmdb_catalog::{CharacterRecord, EpisodeRecord, LocationRecord, ResourceKind};
use rusqlite::Connection;

use crate::error::SyncError;
use crate::loader::{self, LoadCounts, LoadOptions};
use crate::progress::SyncProgress;
use crate::stage::{SyncOutcome, SyncReport, SyncStage};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    pub decode: DecodeOptions,
    pub load: LoadOptions,
}

/// Replaces the database contents with a fresh copy of every listing.
pub struct Synchronizer<S> {
    source: S,
    options: SyncOptions,
}

/// Mutable state of one run.
struct Run<'p> {
    stage: SyncStage,
    counts: LoadCounts,
    progress: Option<&'p dyn SyncProgress>,
}

impl Run<'_> {
    fn enter(&mut self, stage: SyncStage) {
        log::debug!("Sync stage: {} -> {}", self.stage, stage);
        self.stage = stage;
        if let Some(p) = self.progress {
            p.on_stage(stage);
        }
    }
}

impl<S: PageSource> Synchronizer<S> {
    pub fn new(source: S) -> Self {
        Self::with_options(source, SyncOptions::default())
    }

    pub fn with_options(source: S, options: SyncOptions) -> Self {
        Self { source, options }
    }

    /// Reset the store and reload every listing in one transaction.
    ///
    /// Never returns an error: every failure is rolled back and reported
    /// through [`SyncReport::outcome`]. On rollback the database is left
    /// exactly as it was before the call.
    pub fn run_full_sync(
        &self,
        conn: &Connection,
        progress: Option<&dyn SyncProgress>,
    ) -> SyncReport {
        let started = Instant::now();
        let mut run = Run {
            stage: SyncStage::Idle,
            counts: LoadCounts::default(),
            progress,
        };

        let tx = match conn.unchecked_transaction() {
            Ok(tx) => tx,
            Err(e) => {
                log::error!("Could not begin sync transaction: {}", e);
                let outcome = SyncOutcome::Aborted {
                    stage: SyncStage::Idle,
                    error: SyncError::Transaction(e),
                };
                return self.finish(&run, started, outcome, None);
            }
        };

        match self.run_stages(&tx, &mut run) {
            Ok(()) => match tx.commit() {
                Ok(()) => {
                    run.enter(SyncStage::Committed);
                    self.finish(&run, started, SyncOutcome::Committed, None)
                }
                Err(e) => {
                    // The failed commit dropped the transaction, which rolls it back.
                    log::error!("Commit failed: {}", e);
                    self.abort(&mut run, started, SyncError::Transaction(e), None)
                }
            },
            Err(error) => {
                log::warn!("Sync failed while {}; rolling back", run.stage);
                let rollback_error = tx.rollback().err().map(|e| {
                    log::error!("Rollback failed: {}", e);
                    e.to_string()
                });
                self.abort(&mut run, started, error, rollback_error)
            }
        }
    }

    fn run_stages(&self, conn: &Connection, run: &mut Run<'_>) -> Result<(), SyncError> {
        run.enter(SyncStage::Resetting);
        rmdb_db::reset(conn)
            .map_err(|e| SyncError::load_failed(SyncStage::Resetting, None, e))?;

        let locations: Vec<LocationRecord> = self.fetch(run)?;
        let counts = loader::load_locations(conn, &locations)?;
        self.loaded(run, ResourceKind::Location, counts, counts.locations);

        let episodes: Vec<EpisodeRecord> = self.fetch(run)?;
        let counts = loader::load_episodes(conn, &episodes)?;
        self.loaded(run, ResourceKind::Episode, counts, counts.episodes);

        let characters: Vec<CharacterRecord> = self.fetch(run)?;
        let counts =
            loader::load_characters_and_associations(conn, &characters, self.options.load)?;
        self.loaded(run, ResourceKind::Character, counts, counts.characters);

        Ok(())
    }

    /// Enter `R`'s loading stage and fetch the whole listing before
    /// anything of it is inserted.
    fn fetch<R: Resource>(&self, run: &mut Run<'_>) -> Result<Vec<R>, SyncError> {
        run.enter(SyncStage::loading(R::KIND));
        let records = fetch_all::<S, R>(&self.source, self.options.decode)
            .collect::<Result<Vec<R>, _>>()?;
        log::debug!("Fetched {} {}", records.len(), R::KIND.plural());
        if let Some(p) = run.progress {
            p.on_fetched(R::KIND, records.len());
        }
        Ok(records)
    }

    fn loaded(&self, run: &mut Run<'_>, kind: ResourceKind, counts: LoadCounts, rows: u64) {
        run.counts += counts;
        log::debug!("Inserted {} {}", rows, kind.plural());
        if let Some(p) = run.progress {
            p.on_loaded(kind, rows);
        }
    }

    fn abort(
        &self,
        run: &mut Run<'_>,
        started: Instant,
        error: SyncError,
        rollback_error: Option<String>,
    ) -> SyncReport {
        let stage = run.stage;
        run.enter(SyncStage::RolledBack);
        self.finish(run, started, SyncOutcome::Aborted { stage, error }, rollback_error)
    }

    fn finish(
        &self,
        run: &Run<'_>,
        started: Instant,
        outcome: SyncOutcome,
        rollback_error: Option<String>,
    ) -> SyncReport {
        let report = SyncReport {
            stage_reached: run.stage,
            outcome,
            counts: run.counts,
            elapsed: started.elapsed(),
            rollback_error,
        };
        if let Some(p) = run.progress {
            p.on_complete(&report);
        }
        report
    }
}
