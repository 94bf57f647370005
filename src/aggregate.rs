//! Combining release metadata with downloaded tables

use std::collections::BTreeMap;

use crate::budget::RateBudget;
use crate::error::{Error, Result};
use crate::formats::FetchPath;
use crate::http::RepoClient;
use crate::materialize::materialize;
use crate::release::fetch_release;
use crate::table::Table;
use crate::types::{FileReference, FileSelector, LoadedRelease, ReleaseMetadata, ReleaseTarget};

/// Files of a release picked by a selector, in release order for `All` and
/// request order for names
///
/// Names that are not part of the release are warned about and skipped.
pub fn select_files<'m>(
    metadata: &'m ReleaseMetadata,
    selector: &FileSelector,
) -> Vec<&'m FileReference> {
    match selector {
        FileSelector::All => metadata.files.iter().collect(),
        FileSelector::Names(names) => names
            .iter()
            .filter_map(|name| {
                let file = metadata.file(name);
                if file.is_none() {
                    tracing::warn!(file = %name, "Warning: File '{}' not found", name);
                }
                file
            })
            .collect(),
    }
}

/// Download the selected files of a release through the batch path
///
/// Each file is independent: an unsupported format or a failed download is
/// logged and the file is left out. Tables are keyed by base name; when two
/// files share one, the later file wins.
pub async fn download_files(
    client: &RepoClient,
    metadata: &ReleaseMetadata,
    selector: &FileSelector,
) -> BTreeMap<String, Table> {
    let mut tables = BTreeMap::new();

    for file in select_files(metadata, selector) {
        match materialize(client, file, FetchPath::Batch).await {
            Ok(table) => {
                tracing::info!(file = %file.name, "Successfully loaded {}", file.name);
                if tables.insert(file.base_name().to_string(), table).is_some() {
                    tracing::debug!(key = file.base_name(), "table key collision, keeping later file");
                }
            }
            Err(Error::UnsupportedFormat { file }) => {
                tracing::warn!(file = %file, "Unsupported file format: {}", file);
            }
            Err(e) => {
                tracing::error!(file = %file.name, error = %e, "Error processing {}", file.name);
            }
        }
    }

    tables
}

/// Fetch a release and download its selected files
pub async fn load(
    client: &RepoClient,
    budget: &RateBudget,
    target: &ReleaseTarget,
    selector: &FileSelector,
) -> Result<LoadedRelease> {
    let metadata = fetch_release(client, budget, target).await?;
    let tables = download_files(client, &metadata, selector).await;
    Ok(LoadedRelease { metadata, tables })
}
