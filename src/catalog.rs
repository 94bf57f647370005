//! Release catalog resolution
//!
//! A year's releases are discovered in two tiers:
//! 1. The rendered listing page of the year's readme, whose first table has
//!    one row per release (week, date, title, ...). The page is looked up on
//!    each configured branch in order.
//! 2. The contents API directory listing of the year, where every
//!    date-named entry is a release with an unknown title.
//!
//! The second tier only runs when the first produced no rows or could not be
//! fetched at all. Either way the result is sorted by date with no duplicates,
//! so a 1-based week number indexes into it.

use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use crate::budget::RateBudget;
use crate::date::{DATE_FORMAT, DATE_NAME_REGEX};
use crate::error::{Error, Result};
use crate::fallback::first_success;
use crate::http::RepoClient;
use crate::types::{EntryKind, ReleaseId};

macro_rules! selector {
    ($name:ident, $css:expr) => {
        #[allow(clippy::unwrap_used)]
        static $name: LazyLock<Selector> = LazyLock::new(|| Selector::parse($css).unwrap());
    };
}

selector!(TABLE_SELECTOR, "table");
selector!(ROW_SELECTOR, "tr");
selector!(CELL_SELECTOR, "td, th");

/// Where a catalog was read from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogTier {
    /// First table of the rendered year readme
    ListingPage,
    /// Directory listing from the contents API
    ContentsApi,
}

impl CatalogTier {
    /// Tiers in the order they are tried
    pub const ORDER: [CatalogTier; 2] = [CatalogTier::ListingPage, CatalogTier::ContentsApi];
}

impl fmt::Display for CatalogTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CatalogTier::ListingPage => "listing page",
            CatalogTier::ContentsApi => "contents API",
        })
    }
}

/// Extract releases from the first table of a rendered listing page
///
/// The header row is skipped. A row counts when it has at least three cells
/// and its second cell is a `YYYY-MM-DD` calendar date; the third cell is the
/// title.
pub fn parse_listing_table(html: &str) -> Vec<ReleaseId> {
    let document = Html::parse_document(html);
    let Some(table) = document.select(&TABLE_SELECTOR).next() else {
        return Vec::new();
    };

    table
        .select(&ROW_SELECTOR)
        .skip(1)
        .filter_map(|row| {
            let cells: Vec<ElementRef<'_>> = row.select(&CELL_SELECTOR).collect();
            if cells.len() < 3 {
                return None;
            }
            let date = cell_text(&cells[1]);
            let date = release_date(&date)?;
            Some(ReleaseId::new(date, cell_text(&cells[2])))
        })
        .collect()
}

fn cell_text(cell: &ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// A date-shaped name that is also a real calendar date
fn release_date(name: &str) -> Option<NaiveDate> {
    if !DATE_NAME_REGEX.is_match(name) {
        return None;
    }
    match NaiveDate::parse_from_str(name, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            tracing::debug!(name, "skipping date-shaped name that is not a calendar date");
            None
        }
    }
}

/// Sort ascending by date and keep the first entry of each date
fn normalize(mut releases: Vec<ReleaseId>) -> Vec<ReleaseId> {
    releases.sort_by(|a, b| a.date.cmp(&b.date));
    releases.dedup_by(|later, earlier| later.date == earlier.date);
    releases
}

async fn from_listing_page(client: &RepoClient, year: &str) -> Result<Vec<ReleaseId>> {
    let branches = &client.config().branches;
    let (branch, html) = first_success(branches, |branch| async move {
        let url = client.listing_page_url(branch, year)?;
        client.get_text(url.as_str()).await
    })
    .await?;

    let releases = parse_listing_table(&html);
    if releases.is_empty() {
        return Err(Error::NotFound(format!(
            "no release rows on the {year} listing page ({branch})"
        )));
    }
    Ok(releases)
}

async fn from_contents_api(client: &RepoClient, year: &str) -> Result<Vec<ReleaseId>> {
    let entries = client.list_contents(year).await?;
    Ok(entries
        .iter()
        .filter_map(|entry| release_date(&entry.name))
        .map(|date| ReleaseId::new(date, ReleaseId::UNKNOWN_TITLE))
        .collect())
}

/// List the releases of a year, ascending by date
///
/// # Errors
///
/// [`Error::BudgetExhausted`] without touching the network when the budget is
/// known to be zero; otherwise the error of the last tier when every tier failed.
pub async fn list_releases(
    client: &RepoClient,
    budget: &RateBudget,
    year: &str,
) -> Result<Vec<ReleaseId>> {
    budget.ensure_not_exhausted()?;

    let (tier, releases) = first_success(&CatalogTier::ORDER, |tier| async move {
        match tier {
            CatalogTier::ListingPage => from_listing_page(client, year).await,
            CatalogTier::ContentsApi => from_contents_api(client, year).await,
        }
    })
    .await?;

    let releases = normalize(releases);
    tracing::debug!(year, tier = %tier, count = releases.len(), "catalog resolved");
    Ok(releases)
}

/// List the year directories of the repository, ascending
pub async fn list_years(client: &RepoClient, budget: &RateBudget) -> Result<Vec<String>> {
    budget.ensure_not_exhausted()?;

    let mut years: Vec<String> = client
        .list_contents("")
        .await?
        .into_iter()
        .filter(|entry| entry.kind == EntryKind::Dir)
        .map(|entry| entry.name)
        .collect();
    years.sort();
    Ok(years)
}

/// Every year with its releases
///
/// A year whose catalog cannot be resolved is kept with no releases.
pub async fn available(
    client: &RepoClient,
    budget: &RateBudget,
) -> Result<BTreeMap<String, Vec<ReleaseId>>> {
    let mut catalog = BTreeMap::new();

    for year in list_years(client, budget).await? {
        let releases = match list_releases(client, budget, &year).await {
            Ok(releases) => releases,
            Err(e) => {
                tracing::warn!(year = %year, error = %e, "Error fetching datasets for year");
                Vec::new()
            }
        };
        catalog.insert(year, releases);
    }

    Ok(catalog)
}
