//! Ordered fallback strategies
//!
//! Several lookups have more than one way to succeed: the catalog tries the
//! rendered listing page before the contents API, and documents are tried on
//! the `main` branch before `master`. Each of those is an ordered list of
//! strategies run one after another until the first success.
//!
//! # Example
//!
//! ```no_run
//! use tidytuesday::fallback::first_success;
//! use tidytuesday::Error;
//!
//! # async fn example() -> Result<(), Error> {
//! let branches = ["main".to_string(), "master".to_string()];
//! let (branch, body) = first_success(&branches, |branch| async move {
//!     if branch == "master" {
//!         Ok(format!("found on {branch}"))
//!     } else {
//!         Err(Error::NotFound(format!("nothing on {branch}")))
//!     }
//! })
//! .await?;
//! assert_eq!(branch, "master");
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};
use std::fmt::Display;
use std::future::Future;

/// Run `attempt` for each strategy in order and return the first success
///
/// A failure moves on to the next strategy only when the error
/// [`allows_fallback`](Error::allows_fallback); anything else (a drained
/// budget, invalid input) stops the chain immediately. When every strategy
/// fails, the last error is returned.
///
/// # Returns
///
/// The strategy that succeeded together with its value.
pub async fn first_success<'s, S, T, F, Fut>(
    strategies: &'s [S],
    mut attempt: F,
) -> Result<(&'s S, T)>
where
    S: Display,
    F: FnMut(&'s S) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut last_error = None;

    for (position, strategy) in strategies.iter().enumerate() {
        match attempt(strategy).await {
            Ok(value) => {
                if position > 0 {
                    tracing::debug!(strategy = %strategy, position, "fallback strategy succeeded");
                }
                return Ok((strategy, value));
            }
            Err(e) if e.allows_fallback() => {
                tracing::debug!(
                    strategy = %strategy,
                    error = %e,
                    remaining = strategies.len() - position - 1,
                    "strategy failed, trying next"
                );
                last_error = Some(e);
            }
            Err(e) => {
                tracing::debug!(strategy = %strategy, error = %e, "strategy failed, not falling back");
                return Err(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| Error::Other("no strategies configured".to_string())))
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn http(status: u16) -> Error {
        Error::Http {
            url: "http://test".into(),
            status,
        }
    }

    #[tokio::test]
    async fn test_first_strategy_wins_without_trying_others() {
        let calls = Cell::new(0);
        let strategies = ["a", "b", "c"];

        let (which, value) = first_success(&strategies, |s| {
            calls.set(calls.get() + 1);
            async move { Ok::<_, Error>(s.to_uppercase()) }
        })
        .await
        .unwrap();

        assert_eq!(*which, "a");
        assert_eq!(value, "A");
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn test_falls_through_to_later_strategy() {
        let strategies = ["main", "master"];

        let (which, _) = first_success(&strategies, |s| async move {
            if *s == "main" { Err(http(404)) } else { Ok(()) }
        })
        .await
        .unwrap();

        assert_eq!(*which, "master");
    }

    #[tokio::test]
    async fn test_all_failing_returns_last_error() {
        let strategies = [404u16, 500];

        let result: Result<(&u16, ())> =
            first_success(&strategies, |status| async move { Err(http(*status)) }).await;

        match result {
            Err(Error::Http { status, .. }) => assert_eq!(status, 500),
            other => panic!("expected last HTTP error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_fallback_error_stops_chain() {
        let calls = Cell::new(0);
        let strategies = ["first", "second"];

        let result: Result<(&&str, ())> = first_success(&strategies, |_| {
            calls.set(calls.get() + 1);
            async {
                Err(Error::BudgetExhausted {
                    remaining: 0,
                    required: 1,
                })
            }
        })
        .await;

        assert!(matches!(result, Err(Error::BudgetExhausted { .. })));
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn test_empty_strategy_list() {
        let strategies: [&str; 0] = [];
        let result: Result<(&&str, ())> = first_success(&strategies, |_| async { Ok(()) }).await;
        assert!(matches!(result, Err(Error::Other(_))));
    }
}
