//! HTTP access to the repository hosts
//!
//! [`RepoClient`] wraps one `reqwest::Client` and knows how to build every URL
//! the crate touches: the contents API, the rate-limit endpoint, rendered
//! listing pages, and raw README documents.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::{ContentEntry, RateLimitResponse};

/// HTTP client bound to one repository configuration
#[derive(Clone, Debug)]
pub struct RepoClient {
    http: reqwest::Client,
    config: Config,
}

impl RepoClient {
    /// Create a client for the given configuration
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or the HTTP client cannot be created
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| Error::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Configuration this client was built from
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Contents API URL for a path below the data directory ("" = the data directory)
    pub fn contents_url(&self, path: &str) -> Result<Url> {
        let mut segments = vec![
            "repos",
            self.config.owner.as_str(),
            self.config.repo.as_str(),
            "contents",
            self.config.data_dir.as_str(),
        ];
        segments.extend(path.split('/').filter(|s| !s.is_empty()));
        join_segments(&self.config.api_url, &segments)
    }

    /// Rate-limit endpoint URL
    pub fn rate_limit_url(&self) -> Result<Url> {
        join_segments(&self.config.api_url, &["rate_limit"])
    }

    /// Rendered listing page for a year on a branch
    pub fn listing_page_url(&self, branch: &str, year: &str) -> Result<Url> {
        join_segments(
            &self.config.site_url,
            &[
                self.config.owner.as_str(),
                self.config.repo.as_str(),
                "blob",
                branch,
                self.config.data_dir.as_str(),
                year,
                "readme.md",
            ],
        )
    }

    /// Raw README URL for a release on a branch
    pub fn raw_readme_url(&self, branch: &str, year: &str, date: &str) -> Result<Url> {
        join_segments(
            &self.config.raw_url,
            &[
                self.config.owner.as_str(),
                self.config.repo.as_str(),
                branch,
                self.config.data_dir.as_str(),
                year,
                date,
                "README.md",
            ],
        )
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        tracing::debug!(url = %url, "GET");
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url = %url, status = status.as_u16(), "non-success response");
            return Err(Error::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    /// Fetch a URL as text; non-success statuses are [`Error::Http`]
    pub async fn get_text(&self, url: &str) -> Result<String> {
        Ok(self.get(url).await?.text().await?)
    }

    /// Fetch a URL as raw bytes; non-success statuses are [`Error::Http`]
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        Ok(self.get(url).await?.bytes().await?.to_vec())
    }

    /// Fetch and decode a JSON document
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.get_text(url).await?;
        serde_json::from_str(&body).map_err(|e| Error::Parse {
            file: url.to_string(),
            reason: e.to_string(),
        })
    }

    /// List a directory below the data directory
    pub async fn list_contents(&self, path: &str) -> Result<Vec<ContentEntry>> {
        let url = self.contents_url(path)?;
        match self.get_json(url.as_str()).await {
            Err(Error::Http { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => Err(
                Error::NotFound(format!("repository path '{}/{}'", self.config.data_dir, path)),
            ),
            other => other,
        }
    }

    /// Read the remaining call allowance from the rate-limit endpoint
    pub async fn fetch_rate_limit(&self) -> Result<u64> {
        let url = self.rate_limit_url()?;
        let response: RateLimitResponse = self.get_json(url.as_str()).await?;
        Ok(response.resources.core.remaining)
    }
}

fn join_segments(base: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base)?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| Error::Config {
                message: format!("{base} cannot be used as a base URL"),
                key: None,
            })?;
        path.pop_if_empty();
        path.extend(segments);
    }
    Ok(url)
}
