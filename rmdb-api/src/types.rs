use serde::Deserialize;
use serde_json::Value;

use crate::error::FetchCause;

/// One listing page: `{"info": {...}, "results": [...]}`.
///
/// Both members are optional at this level. A missing or empty `results`
/// ends pagination before `info` is looked at, so `info` is kept raw and
/// parsed on demand by [`Page::page_info`].
#[derive(Debug, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub info: Option<Value>,
    #[serde(default)]
    pub results: Option<Vec<Value>>,
    /// Set by the API instead of `results` for out-of-range pages.
    #[serde(default)]
    pub error: Option<String>,
}

/// Pagination metadata of a listing.
#[derive(Debug, Clone, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub count: Option<u64>,
    pub pages: u32,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
}

impl Page {
    pub fn parse(body: &str) -> Result<Self, FetchCause> {
        Ok(serde_json::from_str(body)?)
    }

    /// The page's results, or `None` when absent or empty.
    pub fn take_results(&mut self) -> Option<Vec<Value>> {
        self.results.take().filter(|r| !r.is_empty())
    }

    pub fn page_info(&self) -> Result<PageInfo, FetchCause> {
        let info = self.info.as_ref().ok_or(FetchCause::MissingPageInfo)?;
        Ok(PageInfo::deserialize(info)?)
    }
}
