//! Remote API call allowance
//!
//! The contents API only allows a limited number of anonymous calls per hour.
//! [`RateBudget`] remembers what the rate-limit endpoint reported at the last
//! refresh and is passed explicitly to every operation that spends calls.
//!
//! A budget that could not be read is "unknown", and unknown is permissive:
//! operations go ahead and let the real request fail if the allowance is gone.

use crate::error::{Error, Result};
use crate::http::RepoClient;

/// Remaining-call counter as of the last refresh
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RateBudget {
    remaining: Option<u64>,
}

impl RateBudget {
    /// A budget that has never been checked
    pub fn unknown() -> Self {
        Self { remaining: None }
    }

    /// A budget with a known remaining count
    pub fn known(remaining: u64) -> Self {
        Self {
            remaining: Some(remaining),
        }
    }

    /// Remaining calls at the last successful refresh
    pub fn remaining(&self) -> Option<u64> {
        self.remaining
    }

    /// Re-read the allowance from the rate-limit endpoint
    ///
    /// A failed check leaves the budget unknown rather than failing the caller.
    pub async fn refresh(&mut self, client: &RepoClient) -> Option<u64> {
        self.remaining = match client.fetch_rate_limit().await {
            Ok(remaining) => {
                tracing::debug!(remaining, "rate limit refreshed");
                Some(remaining)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Error fetching rate limit");
                None
            }
        };
        self.remaining
    }

    /// Succeed when at least `required` calls remain (or the budget is unknown)
    pub fn ensure(&self, required: u64) -> Result<()> {
        match self.remaining {
            Some(remaining) if remaining < required => Err(Error::BudgetExhausted {
                remaining,
                required,
            }),
            _ => Ok(()),
        }
    }

    /// Succeed unless the allowance is known to be zero
    pub fn ensure_not_exhausted(&self) -> Result<()> {
        self.ensure(1)
    }
}
