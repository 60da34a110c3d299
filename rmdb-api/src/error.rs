use rmdb_catalog::ResourceKind;

/// Why a page could not be obtained or understood.
#[derive(Debug, thiserror::Error)]
pub enum FetchCause {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error (HTTP {status})")]
    Status { status: u16 },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Response has no pagination info")]
    MissingPageInfo,
}

/// Errors that abort fetching a resource listing.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Failed to fetch {kind} listing: {cause}")]
    FetchFailed {
        kind: ResourceKind,
        #[source]
        cause: FetchCause,
    },

    #[error("Malformed {kind} record: missing or invalid field '{field}'")]
    DecodeFailed {
        kind: ResourceKind,
        field: &'static str,
    },
}

impl ApiError {
    pub fn fetch_failed(kind: ResourceKind, cause: impl Into<FetchCause>) -> Self {
        Self::FetchFailed {
            kind,
            cause: cause.into(),
        }
    }

    pub fn decode_failed(kind: ResourceKind, field: &'static str) -> Self {
        Self::DecodeFailed { kind, field }
    }
}
