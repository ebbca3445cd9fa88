//! Deduplication and ranking of the aggregated pool

use crate::record::SearchResult;
use std::collections::HashSet;

/// Drops results whose identity triple was already seen
///
/// The first occurrence is kept and the input order is otherwise preserved.
///
/// # Arguments
///
/// * `results` - Pooled results from every site, in search order
pub fn deduplicate(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut seen = HashSet::with_capacity(results.len());
    let mut unique = Vec::with_capacity(results.len());

    for result in results {
        if seen.insert(result.identity()) {
            unique.push(result);
        } else {
            tracing::debug!("Dropping duplicate result '{}'", result.name);
        }
    }

    unique
}

/// Sorts by seeders, most first
///
/// The sort is stable: equal seeder counts keep their insertion order.
pub fn rank_by_seeders(results: &mut [SearchResult]) {
    results.sort_by(|a, b| b.seeders.cmp(&a.seeders));
}
