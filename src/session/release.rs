//! Release metadata and README display.

use std::path::PathBuf;

use crate::error::Result;
use crate::readme;
use crate::release::fetch_release;
use crate::types::{ReleaseMetadata, ReleaseTarget};

use super::{TidyTuesday, degrade};

impl TidyTuesday {
    /// Fetch the file list and README of a release
    ///
    /// Needs at least `min_release_budget` remaining calls (when the budget is
    /// known); week targets are 1-based.
    pub async fn try_load_metadata(&mut self, target: &ReleaseTarget) -> Result<ReleaseMetadata> {
        let budget = self.refresh_budget().await;
        fetch_release(&self.client, &budget, target).await
    }

    /// [`try_load_metadata`](Self::try_load_metadata), degrading to empty metadata
    pub async fn load_metadata(&mut self, target: &ReleaseTarget) -> ReleaseMetadata {
        degrade("tt_load_gh", self.try_load_metadata(target).await)
    }

    /// Write the release README to a temporary file and open it in the browser
    ///
    /// Returns the file written, or `None` when the metadata has no README.
    pub fn try_readme(&self, metadata: &ReleaseMetadata) -> Result<Option<PathBuf>> {
        readme::show(&metadata.readme_html)
    }

    /// [`try_readme`](Self::try_readme), with failures logged
    pub fn readme(&self, metadata: &ReleaseMetadata) -> Option<PathBuf> {
        degrade("readme", self.try_readme(metadata))
    }
}
