//! Seedsift: a torrent index search aggregator
//!
//! This crate queries one or more torrent index sites, normalizes every result row
//! into a [`SearchResult`], optionally attaches page comments, and returns the
//! deduplicated union ranked by seeders.

pub mod config;
pub mod enrich;
pub mod fetch;
pub mod output;
pub mod record;
pub mod search;
pub mod sites;

use thiserror::Error;

/// Main error type for Seedsift operations
#[derive(Debug, Error)]
pub enum SiftError {
    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Missing '{locator}' on {site} page")]
    Extraction { site: String, locator: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("No usable site configured")]
    NoSites,

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid site URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Seedsift operations
pub type Result<T> = std::result::Result<T, SiftError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use record::SearchResult;
pub use search::{Searcher, SiteRegistry};
pub use sites::{Extractor, Site, SiteConfig, SiteKind};
