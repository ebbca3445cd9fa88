use crate::config::Config;
use crate::enrich::CommentEnricher;
use crate::fetch::FetchClient;
use crate::record::SearchResult;
use crate::search::aggregator::search_all_sites;
use crate::search::registry::SiteRegistry;
use crate::Result;
use std::time::Instant;

/// Entry point for a query across every registered site
pub struct Searcher {
    registry: SiteRegistry,
    client: FetchClient,
    enricher: CommentEnricher,
}

impl Searcher {
    /// Creates a searcher from the configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Sites plus HTTP, retry and enrichment settings
    ///
    /// # Returns
    ///
    /// * `Ok(Searcher)` - Sites registered and HTTP client built
    /// * `Err(SiftError)` - No site configured, or the client could not be built
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            registry: SiteRegistry::from_config(config)?,
            client: FetchClient::new(&config.http)?,
            enricher: CommentEnricher::from_config(&config.http),
        })
    }

    /// Assembles a searcher from its parts
    pub fn with_parts(
        registry: SiteRegistry,
        client: FetchClient,
        enricher: CommentEnricher,
    ) -> Self {
        Self {
            registry,
            client,
            enricher,
        }
    }

    /// Sites this searcher queries
    pub fn registry(&self) -> &SiteRegistry {
        &self.registry
    }

    /// Runs `query` against every site and returns the ranked aggregate
    ///
    /// Site and row failures shrink the aggregate rather than failing the call.
    ///
    /// # Arguments
    ///
    /// * `query` - Raw query text; spaces are encoded per site
    pub async fn search(&self, query: &str) -> Vec<SearchResult> {
        tracing::info!("Searching for \"{}\"", query);
        let start_time = Instant::now();

        let results = search_all_sites(
            self.registry.sites(),
            &self.client,
            &self.enricher,
            query,
        )
        .await;

        tracing::info!(
            "Search finished: {} results from {} sites in {:?}",
            results.len(),
            self.registry.len(),
            start_time.elapsed()
        );

        results
    }
}
