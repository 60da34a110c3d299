//! Episode air-date parsing and the fallback applied when it fails.
//!
//! Upstream dates are long-form English text such as `"December 2, 2013"`.
//! Under the default policy an unparseable date becomes the current local
//! date instead of failing the record.

use chrono::{Local, NaiveDate};

/// `chrono` format for upstream air dates: full month name, day, year.
pub const AIR_DATE_FORMAT: &str = "%B %d, %Y";

/// What to do with an air date that does not match [`AIR_DATE_FORMAT`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AirDatePolicy {
    /// Use today's local date.
    #[default]
    SubstituteToday,
    /// Treat the record as malformed.
    Reject,
}

impl AirDatePolicy {
    /// Resolve `text` to a date under this policy.
    ///
    /// Returns `None` only for [`AirDatePolicy::Reject`] with unparseable text.
    pub fn resolve(self, text: &str) -> Option<NaiveDate> {
        if let Some(date) = parse_air_date(text) {
            return Some(date);
        }
        match self {
            Self::SubstituteToday => {
                let today = Local::now().date_naive();
                log::debug!("Unparseable air date {:?}, substituting {}", text, today);
                Some(today)
            }
            Self::Reject => None,
        }
    }
}

/// Parse an upstream air date, e.g. `"December 2, 2013"`.
pub fn parse_air_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), AIR_DATE_FORMAT).ok()
}
