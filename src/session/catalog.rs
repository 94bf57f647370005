//! Rate-limit check and release discovery.

use std::collections::BTreeMap;

use crate::catalog;
use crate::error::Result;
use crate::types::ReleaseId;

use super::{TidyTuesday, degrade};

impl TidyTuesday {
    /// Read the remaining API call allowance
    ///
    /// Returns `None` when the rate-limit endpoint could not be read.
    pub async fn rate_limit_check(&mut self) -> Option<u64> {
        self.refresh_budget().await.remaining()
    }

    /// List the releases of one year, ascending by date
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tidytuesday::{Config, TidyTuesday};
    ///
    /// #[tokio::main(flavor = "current_thread")]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let mut tt = TidyTuesday::new(Config::default())?;
    ///     for release in tt.try_datasets("2025").await? {
    ///         println!("{release}");
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn try_datasets(&mut self, year: &str) -> Result<Vec<ReleaseId>> {
        let budget = self.refresh_budget().await;
        catalog::list_releases(&self.client, &budget, year).await
    }

    /// [`try_datasets`](Self::try_datasets), with failures logged and an empty list returned
    pub async fn datasets(&mut self, year: &str) -> Vec<ReleaseId> {
        degrade("tt_datasets", self.try_datasets(year).await)
    }

    /// Every year of the repository with its releases
    pub async fn try_available(&mut self) -> Result<BTreeMap<String, Vec<ReleaseId>>> {
        let budget = self.refresh_budget().await;
        catalog::available(&self.client, &budget).await
    }

    /// [`try_available`](Self::try_available), with failures logged and an empty map returned
    pub async fn available(&mut self) -> BTreeMap<String, Vec<ReleaseId>> {
        degrade("tt_available", self.try_available().await)
    }
}
