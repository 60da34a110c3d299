use std::time::Duration;

use rmdb_catalog::ResourceKind;

use crate::error::FetchCause;

pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Anything that can serve one page of a resource listing as raw JSON text.
///
/// Pages are 1-based. Implementations report transport and status problems
/// only; JSON interpretation is left to the caller.
pub trait PageSource {
    fn get_page(&self, kind: ResourceKind, page: u32) -> Result<String, FetchCause>;
}

impl<T: PageSource + ?Sized> PageSource for &T {
    fn get_page(&self, kind: ResourceKind, page: u32) -> Result<String, FetchCause> {
        (**self).get_page(kind, page)
    }
}

/// Blocking HTTP client for the listing endpoints.
pub struct ApiClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` (e.g. `https://rickandmortyapi.com/api`).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchCause> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("rmdb/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Listing URL of a resource kind, without the page query.
    pub fn endpoint_url(&self, kind: ResourceKind) -> String {
        format!("{}/{}", self.base_url, kind.endpoint())
    }
}

impl PageSource for ApiClient {
    fn get_page(&self, kind: ResourceKind, page: u32) -> Result<String, FetchCause> {
        let url = self.endpoint_url(kind);
        log::debug!("GET {}?page={}", url, page);

        let resp = self.http.get(&url).query(&[("page", page)]).send()?;

        // The paginator stops at `info.pages`, so any non-2xx status, 404
        // included, is a failed fetch.
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchCause::Status {
                status: status.as_u16(),
            });
        }

        Ok(resp.text()?)
    }
}
