//! Single-file, batch and composite downloads.

use std::collections::BTreeMap;

use crate::aggregate;
use crate::error::{Error, Result};
use crate::formats::FetchPath;
use crate::materialize::materialize;
use crate::table::Table;
use crate::types::{FileIdentifier, FileSelector, LoadedRelease, ReleaseMetadata, ReleaseTarget};

use super::{TidyTuesday, degrade};

fn require_metadata(metadata: &ReleaseMetadata) -> Result<()> {
    if metadata.is_empty() {
        return Err(Error::InvalidInput(
            "Invalid TidyTuesday data. Load release metadata first.".to_string(),
        ));
    }
    Ok(())
}

impl TidyTuesday {
    /// Download one file of a release by name or 0-based index
    ///
    /// This is the only path that reads parquet files.
    pub async fn try_download_file(
        &self,
        metadata: &ReleaseMetadata,
        identifier: &FileIdentifier,
    ) -> Result<Table> {
        require_metadata(metadata)?;
        let file = metadata.resolve(identifier)?;
        let table = materialize(&self.client, file, FetchPath::Single).await?;
        tracing::info!(file = %file.name, "Successfully loaded {}", file.name);
        Ok(table)
    }

    /// [`try_download_file`](Self::try_download_file), degrading to an empty table
    pub async fn download_file(
        &self,
        metadata: &ReleaseMetadata,
        identifier: &FileIdentifier,
    ) -> Table {
        degrade(
            "tt_download_file",
            self.try_download_file(metadata, identifier).await,
        )
    }

    /// Download the selected files of a release, keyed by base name
    ///
    /// Individual file failures are logged and leave that file out; only
    /// unusable metadata fails the whole call.
    pub async fn try_download(
        &self,
        metadata: &ReleaseMetadata,
        selector: &FileSelector,
    ) -> Result<BTreeMap<String, Table>> {
        require_metadata(metadata)?;
        Ok(aggregate::download_files(&self.client, metadata, selector).await)
    }

    /// [`try_download`](Self::try_download), degrading to an empty map
    pub async fn download(
        &self,
        metadata: &ReleaseMetadata,
        selector: &FileSelector,
    ) -> BTreeMap<String, Table> {
        degrade("tt_download", self.try_download(metadata, selector).await)
    }

    /// Fetch a release and download its selected files in one go
    pub async fn try_load(
        &mut self,
        target: &ReleaseTarget,
        selector: &FileSelector,
    ) -> Result<LoadedRelease> {
        let budget = self.refresh_budget().await;
        aggregate::load(&self.client, &budget, target, selector).await
    }

    /// [`try_load`](Self::try_load), degrading to an empty release
    pub async fn load(&mut self, target: &ReleaseTarget, selector: &FileSelector) -> LoadedRelease {
        degrade("tt_load", self.try_load(target, selector).await)
    }

    /// Load every file of the release published on `date` (YYYY-MM-DD)
    pub async fn try_get_date(&mut self, date: &str) -> Result<LoadedRelease> {
        let target = ReleaseTarget::parse(date, None)?;
        self.try_load(&target, &FileSelector::All).await
    }

    /// [`try_get_date`](Self::try_get_date), degrading to an empty release
    pub async fn get_date(&mut self, date: &str) -> LoadedRelease {
        degrade("get_date", self.try_get_date(date).await)
    }

    /// Load every file of the `week`-th release (1-based) of `year`
    pub async fn try_get_week(&mut self, year: &str, week: u32) -> Result<LoadedRelease> {
        let target = ReleaseTarget::parse(year, Some(week))?;
        self.try_load(&target, &FileSelector::All).await
    }

    /// [`try_get_week`](Self::try_get_week), degrading to an empty release
    pub async fn get_week(&mut self, year: &str, week: u32) -> LoadedRelease {
        degrade("get_week", self.try_get_week(year, week).await)
    }
}
