//! Lazy traversal of every page of a resource listing.

use crate::client::PageSource;
use crate::decode::{DecodeOptions, Resource};
use crate::error::ApiError;
use crate::types::Page;

/// Walk all pages of `R`'s listing on `source`.
///
/// Nothing is requested until the iterator is first polled.
pub fn fetch_all<S, R>(source: &S, options: DecodeOptions) -> Paginator<'_, S, R>
where
    S: PageSource + ?Sized,
    R: Resource,
{
    Paginator {
        source,
        options,
        next_page: 1,
        total_pages: None,
        pages_fetched: 0,
        buffer: Vec::new().into_iter(),
        done: false,
    }
}

/// Iterator over the decoded records of one resource listing.
///
/// Requests page 1, then follows `info.pages`; never requests a page past
/// that count. A page is decoded in full before any of its records is
/// yielded. The first error is yielded once and ends the iteration.
pub struct Paginator<'a, S: ?Sized, R> {
    source: &'a S,
    options: DecodeOptions,
    next_page: u32,
    total_pages: Option<u32>,
    pages_fetched: u32,
    buffer: std::vec::IntoIter<R>,
    done: bool,
}

impl<S, R> Paginator<'_, S, R>
where
    S: PageSource + ?Sized,
    R: Resource,
{
    /// Pages successfully fetched and decoded so far.
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Total page count reported by the API, once page 1 has been read.
    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    fn fetch_next_page(&mut self) -> Result<(), ApiError> {
        let kind = R::KIND;
        let page_number = self.next_page;

        let body = self
            .source
            .get_page(kind, page_number)
            .map_err(|cause| ApiError::fetch_failed(kind, cause))?;
        let mut page = Page::parse(&body).map_err(|cause| ApiError::fetch_failed(kind, cause))?;

        let Some(results) = page.take_results() else {
            match &page.error {
                Some(message) => log::warn!(
                    "{} page {} has no results ({}); stopping",
                    kind,
                    page_number,
                    message
                ),
                None => log::debug!("{} page {} has no results; stopping", kind, page_number),
            }
            self.done = true;
            return Ok(());
        };

        let info = page
            .page_info()
            .map_err(|cause| ApiError::fetch_failed(kind, cause))?;

        let records = results
            .iter()
            .map(|value| R::decode(value, &self.options))
            .collect::<Result<Vec<R>, ApiError>>()?;

        log::debug!(
            "Fetched {} page {}/{} ({} records)",
            kind,
            page_number,
            info.pages,
            records.len()
        );

        self.pages_fetched += 1;
        self.total_pages = Some(info.pages);
        self.next_page = page_number + 1;
        if self.next_page > info.pages {
            self.done = true;
        }
        self.buffer = records.into_iter();
        Ok(())
    }
}

impl<S, R> Iterator for Paginator<'_, S, R>
where
    S: PageSource + ?Sized,
    R: Resource,
{
    type Item = Result<R, ApiError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.buffer.next() {
                return Some(Ok(record));
            }
            if self.done {
                return None;
            }
            if let Err(e) = self.fetch_next_page() {
                self.done = true;
                return Some(Err(e));
            }
        }
    }
}

impl<S, R> std::iter::FusedIterator for Paginator<'_, S, R>
where
    S: PageSource + ?Sized,
    R: Resource,
{
}
