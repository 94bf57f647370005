//! Tabular file formats
//!
//! The format of a data file is decided by its extension alone:
//! - [`delimited`] - `.csv` and `.tsv`
//! - [`spreadsheet`] - `.xls` and `.xlsx` (first sheet)
//! - [`json`] - `.json`
//! - [`columnar`] - `.parquet` (single-file downloads only)
//!
//! Readers work on a staged file on disk, never on a stream.

pub mod columnar;
pub mod delimited;
pub mod json;
pub mod spreadsheet;

use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};
use crate::table::Table;

/// A supported data file format
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// Comma-separated values
    Csv,
    /// Tab-separated values
    Tsv,
    /// Excel workbook (legacy or OOXML)
    Spreadsheet,
    /// JSON document
    Json,
    /// Apache Parquet
    Parquet,
}

/// Which download path is materializing a file
///
/// The batch path deliberately does not read parquet; only single-file
/// downloads do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchPath {
    /// One file requested by name or index
    Single,
    /// Several files downloaded in one go
    Batch,
}

impl FileFormat {
    /// Detect the format from a file name (case-insensitive extension)
    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(FileFormat::Csv),
            "tsv" => Some(FileFormat::Tsv),
            "xls" | "xlsx" => Some(FileFormat::Spreadsheet),
            "json" => Some(FileFormat::Json),
            "parquet" => Some(FileFormat::Parquet),
            _ => None,
        }
    }

    /// Whether this format can be read on the given path
    pub fn supported_on(self, fetch: FetchPath) -> bool {
        !(self == FileFormat::Parquet && fetch == FetchPath::Batch)
    }

    /// Resolve the format a file will be read with, or why it cannot be
    pub fn for_file(name: &str, fetch: FetchPath) -> Result<Self> {
        match Self::from_file_name(name) {
            Some(format) if format.supported_on(fetch) => Ok(format),
            _ => Err(Error::UnsupportedFormat {
                file: name.to_string(),
            }),
        }
    }

    /// Parse a staged file into a table
    ///
    /// `name` is the original file name and only used in error messages.
    pub fn read(self, staged: &Path, name: &str) -> Result<Table> {
        match self {
            FileFormat::Csv => delimited::read(staged, b',', name),
            FileFormat::Tsv => delimited::read(staged, b'\t', name),
            FileFormat::Spreadsheet => spreadsheet::read(staged, name),
            FileFormat::Json => json::read(staged, name),
            FileFormat::Parquet => columnar::read(staged, name),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileFormat::Csv => "csv",
            FileFormat::Tsv => "tsv",
            FileFormat::Spreadsheet => "spreadsheet",
            FileFormat::Json => "json",
            FileFormat::Parquet => "parquet",
        })
    }
}

pub(crate) fn parse_error(file: &str, reason: impl fmt::Display) -> Error {
    Error::Parse {
        file: file.to_string(),
        reason: reason.to_string(),
    }
}
