//! Release metadata
//!
//! Turns a [`ReleaseTarget`] into [`ReleaseMetadata`]: the data files of the
//! release directory plus its README, fetched from the raw content host on
//! each configured branch in turn.

use crate::budget::RateBudget;
use crate::catalog;
use crate::error::{Error, Result};
use crate::fallback::first_success;
use crate::http::RepoClient;
use crate::readme;
use crate::types::{EntryKind, FileReference, ReleaseMetadata, ReleaseTarget};

/// Resolve a target to its (year, date) pair
///
/// Week targets are 1-based positions in the year's ascending catalog.
pub async fn resolve_target(
    client: &RepoClient,
    budget: &RateBudget,
    target: &ReleaseTarget,
) -> Result<(String, String)> {
    match target {
        ReleaseTarget::Date(_) => Ok((target.year(), target.to_string())),
        ReleaseTarget::Week { year, week } => {
            let releases = catalog::list_releases(client, budget, year).await?;
            if releases.is_empty() {
                return Err(Error::NotFound(format!("No datasets found for year {year}")));
            }
            let index = usize::try_from(*week).unwrap_or(usize::MAX);
            if index < 1 || index > releases.len() {
                return Err(Error::InvalidInput(format!(
                    "Week number {week} is out of range for year {year} (1-{})",
                    releases.len()
                )));
            }
            let release = &releases[index - 1];
            Ok((year.clone(), release.date.clone()))
        }
    }
}

/// Fetch the file list and README of a release
///
/// # Errors
///
/// [`Error::BudgetExhausted`] before any request when fewer than
/// `min_release_budget` calls remain; [`Error::InvalidInput`] for an
/// out-of-range week; transport errors from the directory listing. A missing
/// README is not an error.
pub async fn fetch_release(
    client: &RepoClient,
    budget: &RateBudget,
    target: &ReleaseTarget,
) -> Result<ReleaseMetadata> {
    budget.ensure(client.config().min_release_budget)?;

    let (year, date) = resolve_target(client, budget, target).await?;
    let files = list_files(client, &year, &date).await?;
    let readme_content = fetch_readme(client, &year, &date).await;
    let readme_html = readme::render_html(&readme_content);

    tracing::debug!(date = %date, files = files.len(), "release metadata fetched");

    Ok(ReleaseMetadata {
        date,
        year,
        files,
        readme_content,
        readme_html,
    })
}

/// Data files of a release directory, README files excluded
pub async fn list_files(client: &RepoClient, year: &str, date: &str) -> Result<Vec<FileReference>> {
    let entries = client.list_contents(&format!("{year}/{date}")).await?;

    entries
        .into_iter()
        .filter(|entry| entry.kind == EntryKind::File && !is_readme(&entry.name))
        .map(|entry| {
            let download_url = entry.download_url.ok_or_else(|| Error::Parse {
                file: entry.path.clone(),
                reason: "file entry has no download_url".to_string(),
            })?;
            Ok(FileReference {
                name: entry.name,
                download_url,
                path: entry.path,
            })
        })
        .collect()
}

fn is_readme(name: &str) -> bool {
    name.to_lowercase().starts_with("readme")
}

/// Raw README markdown of a release, or "" when no branch has one
pub async fn fetch_readme(client: &RepoClient, year: &str, date: &str) -> String {
    let branches = client.config().branches.as_slice();
    let result = first_success(branches, |branch| async move {
        let url = client.raw_readme_url(branch, year, date)?;
        client.get_text(url.as_str()).await
    })
    .await;

    match result {
        Ok((_, content)) => content,
        Err(e) => {
            tracing::debug!(date, error = %e, "no README found on any branch");
            String::new()
        }
    }
}
