//! Cross-site aggregation
//!
//! Sites are searched one after another. Each site's failure is contained at the
//! site boundary; each row's failure is contained at the row boundary.

use crate::enrich::CommentEnricher;
use crate::fetch::FetchClient;
use crate::output::site_banner;
use crate::record::SearchResult;
use crate::search::dedup::{deduplicate, rank_by_seeders};
use crate::sites::Extractor;
use crate::Result;

/// Searches every site and returns the deduplicated pool ranked by seeders
///
/// # Pipeline
///
/// 1. For each site in order: build the search URL, fetch it with retries,
///    extract rows, build results, enrich comments when the site allows it
/// 2. Log and skip any site whose fetch or table extraction fails
/// 3. Deduplicate the pool by (name, uploader, magnet link)
/// 4. Stable-sort by seeders, most first
///
/// # Arguments
///
/// * `sites` - Sites to search, in order
/// * `client` - Fetch client shared by every request
/// * `enricher` - Comment enricher for sites with enrichment switched on
/// * `query` - Raw query text
pub async fn search_all_sites(
    sites: &[Box<dyn Extractor>],
    client: &FetchClient,
    enricher: &CommentEnricher,
    query: &str,
) -> Vec<SearchResult> {
    let mut pool = Vec::new();

    for site in sites {
        tracing::info!("{}", site_banner(site.name()));

        match search_site(site.as_ref(), client, enricher, query).await {
            Ok(results) => {
                tracing::info!("{} returned {} results", site.name(), results.len());
                pool.extend(results);
            }
            Err(e) => {
                tracing::warn!("Skipping {} ({}): {}", site.name(), site.base_url(), e);
            }
        }
    }

    let mut ranked = deduplicate(pool);
    rank_by_seeders(&mut ranked);
    ranked
}

/// Searches a single site
///
/// # Arguments
///
/// * `site` - The site to search
/// * `client` - Fetch client for the search page and detail pages
/// * `enricher` - Used only when the site has enrichment switched on
/// * `query` - Raw query text
///
/// # Returns
///
/// * `Ok(Vec<SearchResult>)` - Rows that extracted and parsed cleanly
/// * `Err(SiftError)` - The search page could not be fetched or has no result table
pub async fn search_site(
    site: &dyn Extractor,
    client: &FetchClient,
    enricher: &CommentEnricher,
    query: &str,
) -> Result<Vec<SearchResult>> {
    let url = site.search_url(query);
    tracing::debug!("Searching {} at {}", site.name(), url);

    let document = client.fetch(&url, site.cookies()).await?;
    let mut results = build_results(site, &document)?;

    if results.is_empty() {
        return Ok(results);
    }

    if site.enrich_comments() {
        let stats = enricher.enrich(site, client, &mut results).await;
        tracing::debug!(
            "{} comments: {} fetched, {} empty, {} failed, {} without link",
            site.name(),
            stats.fetched,
            stats.empty,
            stats.failed,
            stats.skipped_no_href
        );
    } else {
        tracing::debug!("Comment enrichment disabled for {}", site.name());
    }

    Ok(results)
}

/// Extracts rows from a search page and converts them to results
///
/// Rows that fail extraction or conversion are logged and skipped.
fn build_results(site: &dyn Extractor, document: &str) -> Result<Vec<SearchResult>> {
    let rows = site.extract_rows(document)?;
    let mut results = Vec::with_capacity(rows.len());

    for row in rows {
        match row.and_then(SearchResult::from_raw) {
            Ok(result) => results.push(result),
            Err(e) => tracing::warn!("Skipping row on {}: {}", site.name(), e),
        }
    }

    Ok(results)
}
