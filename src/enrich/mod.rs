//! Comment enrichment for search results
//!
//! Results that advertise comments get their detail page fetched and the
//! comment texts attached. Fetches for one site's batch run concurrently and
//! are all joined before enrichment returns; a failing fetch only leaves its
//! own result without comments.

mod enricher;

pub use enricher::{CommentEnricher, EnrichmentStats};
