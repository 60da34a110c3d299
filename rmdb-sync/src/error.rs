use rmdb_api::ApiError;
use rmdb_db::OperationError;
use thiserror::Error;

use crate::stage::SyncStage;

/// A failure that aborts a sync run.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Load failed while {stage}{}: {source}", record_suffix(.record))]
    LoadFailed {
        stage: SyncStage,
        /// Id of the record being inserted, if any.
        record: Option<i64>,
        #[source]
        source: OperationError,
    },

    #[error("Transaction error: {0}")]
    Transaction(#[source] rusqlite::Error),
}

impl SyncError {
    pub(crate) fn load_failed(stage: SyncStage, record: Option<i64>, source: OperationError) -> Self {
        Self::LoadFailed {
            stage,
            record,
            source,
        }
    }
}

fn record_suffix(record: &Option<i64>) -> String {
    match record {
        Some(id) => format!(" (record {id})"),
        None => String::new(),
    }
}
