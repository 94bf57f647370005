//! The `TidyTuesday` session, split into focused submodules.
//!
//! The session owns the HTTP client and the rate budget. Its methods are
//! organized by domain:
//! - [`catalog`] - rate-limit check and release discovery
//! - [`release`] - release metadata and README display
//! - [`download`] - single-file, batch and composite downloads
//!
//! Every operation comes in two forms. `try_*` methods return [`Result`] for
//! callers that handle errors themselves; the plain methods log the error and
//! return an empty value (no releases, empty metadata, empty table) so they can
//! be used interactively without error handling.

mod catalog;
mod download;
mod release;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

use crate::budget::RateBudget;
use crate::config::Config;
use crate::error::{Error, ErrorCategory, Result};
use crate::http::RepoClient;

/// A client session against one dataset repository
///
/// Every public operation refreshes the rate budget once before it starts and
/// then passes it down explicitly; the budget is never consulted implicitly.
#[derive(Clone, Debug)]
pub struct TidyTuesday {
    pub(crate) client: RepoClient,
    pub(crate) budget: RateBudget,
}

impl TidyTuesday {
    /// Create a session for the given configuration
    ///
    /// No request is made until the first operation.
    ///
    /// # Errors
    /// Returns error if the configuration is invalid
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            client: RepoClient::new(config)?,
            budget: RateBudget::unknown(),
        })
    }

    /// Configuration of this session
    pub fn config(&self) -> &Config {
        self.client.config()
    }

    /// Budget as of the last refresh
    pub fn budget(&self) -> RateBudget {
        self.budget
    }

    pub(crate) async fn refresh_budget(&mut self) -> RateBudget {
        self.budget.refresh(&self.client).await;
        self.budget
    }
}

/// Log a failed operation and fall back to the neutral value
pub(crate) fn degrade<T: Default>(operation: &str, result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            report(operation, &e);
            T::default()
        }
    }
}

pub(crate) fn report(operation: &str, error: &Error) {
    match (error.category(), error) {
        (ErrorCategory::BudgetExhausted, Error::BudgetExhausted { required: 1, .. }) => {
            tracing::warn!(operation, "GitHub API rate limit exhausted. Try again later.");
        }
        (ErrorCategory::BudgetExhausted, _) => {
            tracing::warn!(operation, error = %error, "GitHub API rate limit is too low. Try again later.");
        }
        (ErrorCategory::InvalidInput, _) => {
            tracing::warn!(operation, code = error.error_code(), "{}", error);
        }
        (category, _) => {
            tracing::error!(operation, ?category, code = error.error_code(), "{}", error);
        }
    }
}
