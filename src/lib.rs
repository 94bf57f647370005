//! # tidytuesday
//!
//! Client library for the weekly [TidyTuesday](https://github.com/rfordatascience/tidytuesday)
//! dataset repository.
//!
//! ## Design Philosophy
//!
//! tidytuesday is designed to be:
//! - **One call per question** - find a week's date, list a year, load a release
//! - **Sensible defaults** - points at the public repository with zero configuration
//! - **Forgiving by default** - plain methods log failures and return empty values;
//!   `try_*` methods return [`Result`] for callers that want the error
//! - **Budget aware** - the anonymous API allowance is checked before calls are spent
//!
//! ## Quick Start
//!
//! ```no_run
//! use tidytuesday::{Config, FileSelector, ReleaseTarget, TidyTuesday};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut tt = TidyTuesday::new(Config::default())?;
//!
//!     let date = tidytuesday::last_tuesday(None)?;
//!     let target = ReleaseTarget::parse(&date, None)?;
//!     let release = tt.try_load(&target, &FileSelector::All).await?;
//!
//!     for (name, table) in &release.tables {
//!         println!("{name}:\n{table}");
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Combining release metadata with downloaded tables
pub mod aggregate;
/// Remote API call allowance
pub mod budget;
/// Release catalog resolution
pub mod catalog;
/// Command-line interface
pub mod cli;
/// Configuration types
pub mod config;
/// Weekly release date arithmetic
pub mod date;
/// Error types
pub mod error;
/// Ordered fallback strategies
pub mod fallback;
/// Tabular file formats
pub mod formats;
/// HTTP access to the repository hosts
pub mod http;
/// Downloading one data file into a table
pub mod materialize;
/// README rendering and display
pub mod readme;
/// Release metadata
pub mod release;
/// The session facade (decomposed into focused submodules)
pub mod session;
/// In-memory tabular data
pub mod table;
/// Core types
pub mod types;

// Re-export commonly used types
pub use budget::RateBudget;
pub use config::Config;
pub use date::{ReferenceDate, last_tuesday};
pub use error::{Error, ErrorCategory, Result};
pub use formats::{FetchPath, FileFormat};
pub use http::RepoClient;
pub use session::TidyTuesday;
pub use table::{Table, Value};
pub use types::{
    FileIdentifier, FileReference, FileSelector, LoadedRelease, ReleaseId, ReleaseMetadata,
    ReleaseTarget,
};
