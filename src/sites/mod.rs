//! Site module: per-site search URL building and result extraction
//!
//! Each supported site is a [`SiteKind`] variant backed by a static
//! [`Locators`] set. A configured mirror of a variant becomes a [`Site`], which
//! implements the [`Extractor`] capability trait used by the rest of the crate.

mod extractor;
mod locators;
mod row;

pub use crate::config::SiteConfig;
pub use extractor::Extractor;
pub use locators::{Locators, THE_PIRATE_BAY};
pub use row::RawRow;

use crate::Result;
use extractor::{extract_comment_texts, extract_table_rows, Selectors};
use serde::Deserialize;
use std::fmt;

/// Supported site variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SiteKind {
    ThePirateBay,
}

impl SiteKind {
    /// Locators describing this variant's pages
    pub fn locators(&self) -> &'static Locators {
        match self {
            Self::ThePirateBay => &THE_PIRATE_BAY,
        }
    }

    /// Default (protocol, domain, tld) of this variant
    pub fn default_mirror(&self) -> (&'static str, &'static str, &'static str) {
        match self {
            Self::ThePirateBay => ("https", "thepiratebay", "org"),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ThePirateBay => "ThePirateBay",
        }
    }
}

impl fmt::Display for SiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One configured site instance
#[derive(Debug, Clone)]
pub struct Site {
    kind: SiteKind,
    base_url: String,
    enrich_comments: bool,
    cookies: Option<String>,
    locators: &'static Locators,
    selectors: Selectors,
}

impl Site {
    /// Creates a site from its configuration entry
    ///
    /// # Returns
    ///
    /// * `Ok(Site)` - Site with its locators compiled
    /// * `Err(SiftError::Parse)` - A locator of the variant is not valid CSS
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let locators = config.variant.locators();
        Ok(Self {
            kind: config.variant,
            base_url: config.base_url(),
            enrich_comments: config.enrich_comments,
            cookies: config.cookies.clone(),
            locators,
            selectors: Selectors::compile(locators)?,
        })
    }
}

impl Extractor for Site {
    fn name(&self) -> &str {
        self.kind.display_name()
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn enrich_comments(&self) -> bool {
        self.enrich_comments
    }

    fn cookies(&self) -> Option<&str> {
        self.cookies.as_deref()
    }

    fn search_url(&self, query: &str) -> String {
        build_search_url(&self.base_url, self.locators, query)
    }

    fn extract_rows(&self, document: &str) -> Result<Vec<Result<RawRow>>> {
        extract_table_rows(self.name(), self.locators, &self.selectors, document)
    }

    fn extract_comments(&self, document: &str) -> Vec<String> {
        extract_comment_texts(&self.selectors, document)
    }
}

/// Joins the base URL and the variant's search path for `query`
///
/// Spaces in the query are replaced by the variant's whitespace token.
pub fn build_search_url(base_url: &str, locators: &Locators, query: &str) -> String {
    let query = query.replace(' ', locators.whitespace);
    format!(
        "{}{}",
        base_url,
        locators.search_path.replace("{query}", &query)
    )
}
