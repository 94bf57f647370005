//! Error types for tidytuesday
//!
//! This module provides the crate-wide error type and its classification:
//! - Domain-specific variants (invalid input, transport, parse, budget)
//! - A category mapping used for user-facing reporting
//! - Stable machine-readable error codes

use thiserror::Error;

/// Result type alias for tidytuesday operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for tidytuesday
///
/// Each variant carries enough context (URL, file name, budget numbers) to be
/// reported to the user without further lookups.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed date, out-of-range week, bad argument
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "api_url")
        key: Option<String>,
    },

    /// Remote host answered with a non-success status
    #[error("HTTP {status} fetching {url}")]
    Http {
        /// The URL that was requested
        url: String,
        /// The HTTP status code returned
        status: u16,
    },

    /// Network error (connection refused, DNS, body read failure)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Downloaded content could not be parsed into a table
    #[error("failed to parse {file}: {reason}")]
    Parse {
        /// The file (or document) that failed to parse
        file: String,
        /// The reason parsing failed
        reason: String,
    },

    /// File extension has no tabular reader on this path
    #[error("unsupported file format: {file}")]
    UnsupportedFormat {
        /// The file name that was rejected
        file: String,
    },

    /// Remote API call allowance is too low to start the operation
    #[error("GitHub API rate limit too low: {remaining} remaining, {required} required")]
    BudgetExhausted {
        /// Remaining calls at the last check
        remaining: u64,
        /// Calls the operation needs before it may start
        required: u64,
    },

    /// Requested release, file or document does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid URL built from configuration
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Coarse classification of an [`Error`], used when reporting to users
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller supplied something malformed
    InvalidInput,
    /// Network failure or non-success HTTP status
    TransportFailure,
    /// Content arrived but could not be parsed
    ParseFailure,
    /// Format has no reader
    Unsupported,
    /// Remote call allowance exhausted
    BudgetExhausted,
    /// Anything else (local I/O, configuration)
    Internal,
}

impl Error {
    /// Map this error onto the reporting taxonomy
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidInput(_) | Error::NotFound(_) => ErrorCategory::InvalidInput,
            Error::Http { .. } | Error::Network(_) => ErrorCategory::TransportFailure,
            Error::Parse { .. } | Error::Serialization(_) => ErrorCategory::ParseFailure,
            Error::UnsupportedFormat { .. } => ErrorCategory::Unsupported,
            Error::BudgetExhausted { .. } => ErrorCategory::BudgetExhausted,
            Error::Config { .. } | Error::Io(_) | Error::Url(_) | Error::Other(_) => {
                ErrorCategory::Internal
            }
        }
    }

    /// Get the machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidInput(_) => "invalid_input",
            Error::Config { .. } => "config_error",
            Error::Http { .. } => "http_error",
            Error::Network(_) => "network_error",
            Error::Parse { .. } => "parse_error",
            Error::UnsupportedFormat { .. } => "unsupported_format",
            Error::BudgetExhausted { .. } => "budget_exhausted",
            Error::NotFound(_) => "not_found",
            Error::Io(_) => "io_error",
            Error::Serialization(_) => "serialization_error",
            Error::Url(_) => "invalid_url",
            Error::Other(_) => "internal_error",
        }
    }

    /// Whether a later strategy in a fallback chain may still succeed
    ///
    /// Transport failures and "nothing there" outcomes are worth another
    /// strategy; a drained budget or a local bug is not.
    pub fn allows_fallback(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::TransportFailure | ErrorCategory::ParseFailure
        ) || matches!(self, Error::NotFound(_))
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn all_error_variants() -> Vec<(Error, ErrorCategory, &'static str)> {
        vec![
            (
                Error::InvalidInput("week 0".into()),
                ErrorCategory::InvalidInput,
                "invalid_input",
            ),
            (
                Error::Config {
                    message: "empty".into(),
                    key: Some("branches".into()),
                },
                ErrorCategory::Internal,
                "config_error",
            ),
            (
                Error::Http {
                    url: "https://example.com".into(),
                    status: 404,
                },
                ErrorCategory::TransportFailure,
                "http_error",
            ),
            (
                Error::Parse {
                    file: "a.csv".into(),
                    reason: "ragged".into(),
                },
                ErrorCategory::ParseFailure,
                "parse_error",
            ),
            (
                Error::UnsupportedFormat {
                    file: "a.xyz".into(),
                },
                ErrorCategory::Unsupported,
                "unsupported_format",
            ),
            (
                Error::BudgetExhausted {
                    remaining: 0,
                    required: 1,
                },
                ErrorCategory::BudgetExhausted,
                "budget_exhausted",
            ),
            (
                Error::NotFound("x.csv".into()),
                ErrorCategory::InvalidInput,
                "not_found",
            ),
            (
                Error::Io(std::io::Error::other("disk")),
                ErrorCategory::Internal,
                "io_error",
            ),
            (Error::Other("boom".into()), ErrorCategory::Internal, "internal_error"),
        ]
    }

    #[test]
    fn test_category_and_code_for_every_variant() {
        for (error, category, code) in all_error_variants() {
            assert_eq!(error.category(), category, "category for {error}");
            assert_eq!(error.error_code(), code, "code for {error}");
        }
    }

    #[test]
    fn test_fallback_eligibility() {
        assert!(
            Error::Http {
                url: "u".into(),
                status: 500
            }
            .allows_fallback()
        );
        assert!(Error::NotFound("table".into()).allows_fallback());
        assert!(
            !Error::BudgetExhausted {
                remaining: 0,
                required: 1
            }
            .allows_fallback()
        );
        assert!(!Error::InvalidInput("bad".into()).allows_fallback());
    }

    #[test]
    fn test_display_messages() {
        let err = Error::BudgetExhausted {
            remaining: 3,
            required: 5,
        };
        assert_eq!(
            err.to_string(),
            "GitHub API rate limit too low: 3 remaining, 5 required"
        );

        let err = Error::Http {
            url: "https://api.github.com/x".into(),
            status: 404,
        };
        assert_eq!(err.to_string(), "HTTP 404 fetching https://api.github.com/x");
    }
}
