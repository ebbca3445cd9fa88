use crate::config::HttpConfig;
use crate::fetch::FetchClient;
use crate::record::{format_comments, SearchResult};
use crate::sites::Extractor;
use futures::stream::{self, StreamExt};
use std::time::Duration;
use tracing::{debug, warn};

/// Statistics from one enrichment batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentStats {
    /// Detail pages fetched that carried comments
    pub fetched: u32,
    /// Detail pages fetched without any comment element
    pub empty: u32,
    /// Detail page fetches that failed
    pub failed: u32,
    /// Results advertising comments but without a detail link
    pub skipped_no_href: u32,
}

/// Outcome of enriching a single result
enum Outcome {
    Fetched,
    Empty,
    Failed,
    NoHref,
}

/// Fetches detail pages and attaches formatted comments
#[derive(Debug, Clone)]
pub struct CommentEnricher {
    delay: Duration,
    max_concurrent: usize,
}

impl CommentEnricher {
    /// Creates an enricher
    ///
    /// `delay` precedes every detail fetch; `max_concurrent` bounds the fetches
    /// in flight at once.
    pub fn new(delay: Duration, max_concurrent: usize) -> Self {
        Self {
            delay,
            max_concurrent: max_concurrent.max(1),
        }
    }

    pub fn from_config(config: &HttpConfig) -> Self {
        Self::new(
            Duration::from_millis(config.comment_delay_ms),
            config.max_concurrent_comment_fetches,
        )
    }

    /// Enriches every result of `results` that advertises comments
    ///
    /// Results with `comment_count == 0` are never fetched. Each task owns
    /// exactly one result; completion order does not matter since callers
    /// sort afterwards.
    ///
    /// # Arguments
    ///
    /// * `site` - Site whose detail pages are fetched and parsed
    /// * `client` - Fetch client for the detail pages
    /// * `results` - That site's results, updated in place
    ///
    /// # Returns
    ///
    /// Counts of fetched, empty, failed and skipped results
    pub async fn enrich(
        &self,
        site: &dyn Extractor,
        client: &FetchClient,
        results: &mut [SearchResult],
    ) -> EnrichmentStats {
        let mut stats = EnrichmentStats::default();

        let eligible: Vec<&mut SearchResult> = results
            .iter_mut()
            .filter(|result| result.has_comments())
            .collect();

        if eligible.is_empty() {
            return stats;
        }

        debug!(
            "Fetching comments for {} results on {}",
            eligible.len(),
            site.name()
        );

        let delay = self.delay;
        let outcomes: Vec<Outcome> = stream::iter(eligible)
            .map(move |result| async move { enrich_one(site, client, delay, result).await })
            .buffer_unordered(self.max_concurrent)
            .collect()
            .await;

        for outcome in outcomes {
            match outcome {
                Outcome::Fetched => stats.fetched += 1,
                Outcome::Empty => stats.empty += 1,
                Outcome::Failed => stats.failed += 1,
                Outcome::NoHref => stats.skipped_no_href += 1,
            }
        }

        stats
    }
}

async fn enrich_one(
    site: &dyn Extractor,
    client: &FetchClient,
    delay: Duration,
    result: &mut SearchResult,
) -> Outcome {
    let url = match result.href.as_deref() {
        Some(href) => site.detail_url(href),
        None => {
            debug!("No detail link for '{}', skipping comments", result.name);
            return Outcome::NoHref;
        }
    };

    tokio::time::sleep(delay).await;
    debug!("Fetching comments for '{}' from {}", result.name, url);

    match client.fetch_page(&url, site.cookies()).await {
        Ok(document) => {
            let comments = site.extract_comments(&document);
            if comments.is_empty() {
                Outcome::Empty
            } else {
                result.comments = format_comments(comments);
                Outcome::Fetched
            }
        }
        Err(e) => {
            warn!("Comments unavailable for '{}': {}", result.name, e);
            Outcome::Failed
        }
    }
}
