//! Id extraction from embedded resource URLs.
//!
//! The API links related resources by URL (`.../location/3`); the numeric
//! id is the final path segment.

use crate::types::UNKNOWN_LOCATION_ID;

/// Extract the trailing numeric id of a resource URL.
///
/// Returns `0` for an empty URL or when the last segment is not an integer.
pub fn id_from_url(url: &str) -> i64 {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return UNKNOWN_LOCATION_ID;
    }
    trimmed
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse::<i64>().ok())
        .unwrap_or(UNKNOWN_LOCATION_ID)
}

/// Extract ids from a list of URLs, keeping one entry per URL.
///
/// Malformed entries become `0` rather than being dropped, so the output has
/// the same length and order as the input.
pub fn ids_from_urls<'a, I>(urls: I) -> Vec<i64>
where
    I: IntoIterator<Item = &'a str>,
{
    urls.into_iter().map(id_from_url).collect()
}
