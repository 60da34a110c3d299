//! Client for the paginated Rick and Morty REST API.
//!
//! [`ApiClient`] performs blocking page requests, [`decode`] turns one JSON
//! result into a typed record, and [`fetch_all`] walks every page of a
//! listing lazily.

pub mod client;
pub mod decode;
pub mod error;
pub mod fetch;
pub mod types;

pub use client::{ApiClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, PageSource};
pub use decode::{
    DecodeOptions, Resource, decode_character, decode_episode, decode_episode_with,
    decode_location,
};
pub use error::{ApiError, FetchCause};
pub use fetch::{Paginator, fetch_all};
pub use types::{Page, PageInfo};
