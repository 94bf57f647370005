//! Weekly release date arithmetic
//!
//! Releases are published on Tuesdays, with week boundaries taken from the
//! America/New_York civil calendar. Given any reference date, the release of
//! "that week" is the most recent Tuesday on or before it, where a week runs
//! Tuesday through Monday.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Error, Result};

/// Timezone defining weekly release boundaries
pub const RELEASE_TIMEZONE: Tz = chrono_tz::America::New_York;

/// Format used for release dates everywhere
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Matches a release-date shaped name ("2025-03-11")
#[allow(clippy::unwrap_used)]
pub(crate) static DATE_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// A reference date accepted by [`last_tuesday`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReferenceDate {
    /// ISO "YYYY-MM-DD" text, validated when resolved
    Iso(String),
    /// A calendar date
    Date(NaiveDate),
}

impl From<&str> for ReferenceDate {
    fn from(s: &str) -> Self {
        ReferenceDate::Iso(s.to_string())
    }
}

impl From<String> for ReferenceDate {
    fn from(s: String) -> Self {
        ReferenceDate::Iso(s)
    }
}

impl From<NaiveDate> for ReferenceDate {
    fn from(date: NaiveDate) -> Self {
        ReferenceDate::Date(date)
    }
}

impl From<NaiveDateTime> for ReferenceDate {
    fn from(datetime: NaiveDateTime) -> Self {
        ReferenceDate::Date(datetime.date())
    }
}

impl<T: TimeZone> From<DateTime<T>> for ReferenceDate {
    fn from(datetime: DateTime<T>) -> Self {
        ReferenceDate::Date(datetime.date_naive())
    }
}

impl ReferenceDate {
    fn to_naive(&self) -> Result<NaiveDate> {
        match self {
            ReferenceDate::Iso(s) => parse_iso_date(s),
            ReferenceDate::Date(d) => Ok(*d),
        }
    }
}

/// Parse a "YYYY-MM-DD" date
pub fn parse_iso_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| Error::InvalidInput(format!("date must be in YYYY-MM-DD format, got '{s}'")))
}

/// Format a date as "YYYY-MM-DD"
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Today's date in the release timezone
pub fn today() -> NaiveDate {
    Utc::now().with_timezone(&RELEASE_TIMEZONE).date_naive()
}

/// The Tuesday of the release week containing `date`
///
/// Weekday index runs Monday=0..Sunday=6; the step back is `(dow - 1) mod 7`,
/// so Tuesday maps to itself and Monday to the Tuesday six days earlier.
pub fn release_tuesday(date: NaiveDate) -> NaiveDate {
    let dow = i64::from(date.weekday().num_days_from_monday());
    let offset = (dow - 1).rem_euclid(7);
    date - TimeDelta::days(offset)
}

/// Resolve the release date ("YYYY-MM-DD") for a reference date
///
/// With no reference, today's date in America/New_York is used.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] when an ISO string does not parse.
///
/// # Examples
///
/// ```
/// use tidytuesday::last_tuesday;
///
/// assert_eq!(last_tuesday(Some("2025-03-12".into())).unwrap(), "2025-03-11");
/// assert_eq!(last_tuesday(Some("2025-03-10".into())).unwrap(), "2025-03-04");
/// ```
pub fn last_tuesday(reference: Option<ReferenceDate>) -> Result<String> {
    let date = match reference {
        Some(r) => r.to_naive()?,
        None => today(),
    };
    Ok(format_date(release_tuesday(date)))
}
