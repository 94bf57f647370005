//! Core types for tidytuesday

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::date::{format_date, parse_iso_date};
use crate::error::{Error, Result};
use crate::table::Table;

/// One weekly release, as listed in a year's catalog
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReleaseId {
    /// Four-digit year the release belongs to
    pub year: String,
    /// Release date (YYYY-MM-DD), always inside `year`
    pub date: String,
    /// Dataset title, "Unknown" when only the directory name was available
    pub title: String,
    /// Repository path relative to the data directory: "{year}/{date}"
    pub path: String,
}

impl ReleaseId {
    /// Title used when the catalog came from a bare directory listing
    pub const UNKNOWN_TITLE: &'static str = "Unknown";

    /// Build an identifier for a release date; the year is derived from the date
    pub fn new(date: NaiveDate, title: impl Into<String>) -> Self {
        let year = date.year().to_string();
        let date = format_date(date);
        Self {
            path: format!("{year}/{date}"),
            year,
            date,
            title: title.into(),
        }
    }
}

impl fmt::Display for ReleaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.date, self.title)
    }
}

/// A downloadable data file inside a release
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReference {
    /// File name including extension
    pub name: String,
    /// Direct download URL on the raw content host
    pub download_url: String,
    /// Repository path of the file
    pub path: String,
}

impl FileReference {
    /// File name without its final extension, used as the table key
    pub fn base_name(&self) -> &str {
        match self.name.rfind('.') {
            Some(idx) if idx > 0 => &self.name[..idx],
            _ => &self.name,
        }
    }
}

/// Everything addressable about one release, without the data itself
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReleaseMetadata {
    /// Release date (YYYY-MM-DD)
    pub date: String,
    /// Four-digit year
    pub year: String,
    /// Data files in listing order (README files excluded)
    pub files: Vec<FileReference>,
    /// Raw markdown of the release README ("" when none was found)
    pub readme_content: String,
    /// Standalone HTML document rendered from `readme_content`
    pub readme_html: String,
}

impl ReleaseMetadata {
    /// True for the neutral value returned by degraded operations
    pub fn is_empty(&self) -> bool {
        self.date.is_empty() && self.files.is_empty()
    }

    /// Find a file by exact name
    pub fn file(&self, name: &str) -> Option<&FileReference> {
        self.files.iter().find(|f| f.name == name)
    }

    /// Resolve a name-or-index identifier against the file list
    pub fn resolve(&self, identifier: &FileIdentifier) -> Result<&FileReference> {
        match identifier {
            FileIdentifier::ByIndex(idx) => self.files.get(*idx).ok_or_else(|| {
                Error::InvalidInput(format!(
                    "file index {} is out of range ({} files)",
                    idx,
                    self.files.len()
                ))
            }),
            FileIdentifier::ByName(name) => self
                .file(name)
                .ok_or_else(|| Error::NotFound(format!("file '{name}'"))),
        }
    }
}

/// A release together with its materialized tables
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadedRelease {
    /// Metadata the tables were loaded from
    pub metadata: ReleaseMetadata,
    /// Tables keyed by file base name; a later file with the same base name wins
    pub tables: BTreeMap<String, Table>,
}

impl LoadedRelease {
    /// Release date (YYYY-MM-DD)
    pub fn date(&self) -> &str {
        &self.metadata.date
    }

    /// Four-digit year
    pub fn year(&self) -> &str {
        &self.metadata.year
    }

    /// Look up a table by file base name
    pub fn table(&self, base_name: &str) -> Option<&Table> {
        self.tables.get(base_name)
    }
}

/// Identifies one file of a release
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileIdentifier {
    /// Exact file name, e.g. "cheeses.csv"
    ByName(String),
    /// Zero-based position in the release's file list
    ByIndex(usize),
}

impl FileIdentifier {
    /// Interpret a command-line token: all digits means an index
    pub fn parse(token: &str) -> Self {
        match token.parse::<usize>() {
            Ok(idx) => FileIdentifier::ByIndex(idx),
            Err(_) => FileIdentifier::ByName(token.to_string()),
        }
    }
}

impl From<usize> for FileIdentifier {
    fn from(idx: usize) -> Self {
        FileIdentifier::ByIndex(idx)
    }
}

impl From<&str> for FileIdentifier {
    fn from(name: &str) -> Self {
        FileIdentifier::ByName(name.to_string())
    }
}

impl fmt::Display for FileIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileIdentifier::ByName(name) => write!(f, "'{name}'"),
            FileIdentifier::ByIndex(idx) => write!(f, "#{idx}"),
        }
    }
}

/// Which files of a release to download
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FileSelector {
    /// Every data file
    #[default]
    All,
    /// Only the named files; unknown names are warned about and skipped
    Names(Vec<String>),
}

impl FileSelector {
    /// Sentinel word selecting every file on the command line
    pub const ALL: &'static str = "All";

    /// Build a selector from command-line tokens; empty or "All" means every file
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Self {
        if args.is_empty() || args.iter().any(|a| a.as_ref() == Self::ALL) {
            FileSelector::All
        } else {
            FileSelector::Names(args.iter().map(|a| a.as_ref().to_string()).collect())
        }
    }
}

/// How a caller addresses a release
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReleaseTarget {
    /// A release date directly
    Date(NaiveDate),
    /// The n-th release (1-based) of a year's catalog
    Week {
        /// Four-digit year
        year: String,
        /// One-based position in the ascending catalog
        week: u32,
    },
}

impl ReleaseTarget {
    /// Build a target from a date-or-year argument and an optional week number
    ///
    /// Without a week the argument must be an ISO date; with one it must be a
    /// four-digit year.
    pub fn parse(date_or_year: &str, week: Option<u32>) -> Result<Self> {
        let value = date_or_year.trim();
        match week {
            None => Ok(ReleaseTarget::Date(parse_iso_date(value)?)),
            Some(week) => {
                if value.len() != 4 || !value.chars().all(|c| c.is_ascii_digit()) {
                    return Err(Error::InvalidInput(format!(
                        "'{value}' is not a four-digit year"
                    )));
                }
                Ok(ReleaseTarget::Week {
                    year: value.to_string(),
                    week,
                })
            }
        }
    }

    /// The year this target lives in
    pub fn year(&self) -> String {
        match self {
            ReleaseTarget::Date(date) => date.year().to_string(),
            ReleaseTarget::Week { year, .. } => year.clone(),
        }
    }
}

impl fmt::Display for ReleaseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseTarget::Date(date) => write!(f, "{}", format_date(*date)),
            ReleaseTarget::Week { year, week } => write!(f, "{year} week {week}"),
        }
    }
}

/// Kind of an entry in a repository directory listing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory
    Dir,
    /// Symlink, submodule or anything newer
    #[serde(other)]
    Other,
}

/// One entry of the repository contents API
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    /// Entry name (file or directory name)
    pub name: String,
    /// Entry kind
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Raw download URL (absent for directories)
    #[serde(default)]
    pub download_url: Option<String>,
    /// Repository path
    pub path: String,
}

/// Shape of the rate-limit endpoint response (only the part we read)
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct RateLimitResponse {
    pub(crate) resources: RateLimitResources,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct RateLimitResources {
    pub(crate) core: RateLimitWindow,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct RateLimitWindow {
    pub(crate) remaining: u64,
}
