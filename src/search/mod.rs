//! Search module: the query pipeline across all configured sites
//!
//! This module contains:
//! - The site registry built from configuration
//! - Per-site search and cross-site aggregation
//! - Deduplication and seeder ranking
//! - The [`Searcher`] entry point driving a whole query

mod aggregator;
mod dedup;
mod registry;
mod searcher;

pub use aggregator::{search_all_sites, search_site};
pub use dedup::{deduplicate, rank_by_seeders};
pub use registry::SiteRegistry;
pub use searcher::Searcher;
