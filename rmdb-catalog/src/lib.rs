//! Transfer records for the mirrored character/location/episode dataset.
//!
//! This crate has no database or network dependencies. Records are built by
//! `rmdb-api` decoders and consumed by the `rmdb-sync` loader; they carry no
//! identity beyond a single sync run.

pub mod air_date;
pub mod types;
pub mod url_id;

pub use air_date::{AIR_DATE_FORMAT, AirDatePolicy, parse_air_date};
pub use types::*;
pub use url_id::{id_from_url, ids_from_urls};
