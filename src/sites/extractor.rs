//! Table extraction driven by a [`Locators`] set
//!
//! Documents are parsed and fully consumed inside each call so no parsed tree
//! is ever held across an await point.

use crate::sites::locators::Locators;
use crate::sites::row::RawRow;
use crate::{Result, SiftError};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// Capability set every searchable site provides
///
/// Implementors turn a query into a URL, a fetched search page into rows, and
/// a fetched detail page into comment texts.
pub trait Extractor: Send + Sync {
    /// Display name used in logs and banners
    fn name(&self) -> &str;

    /// `{protocol}://{domain}.{tld}` of this instance
    fn base_url(&self) -> &str;

    /// Whether detail pages should be fetched for comments
    fn enrich_comments(&self) -> bool;

    /// Raw `Cookie` header value for requests to this site
    fn cookies(&self) -> Option<&str> {
        None
    }

    /// Builds the search URL for `query`
    fn search_url(&self, query: &str) -> String;

    /// Extracts every result row of a search page
    ///
    /// The outer error means the page has no usable result table. Inner errors
    /// are per row: a row missing a mandatory field fails alone.
    fn extract_rows(&self, document: &str) -> Result<Vec<Result<RawRow>>>;

    /// Extracts comment texts from a detail page, in document order
    fn extract_comments(&self, document: &str) -> Vec<String>;

    /// Absolute URL of a result's detail page
    fn detail_url(&self, href: &str) -> String {
        if href.starts_with("http://") || href.starts_with("https://") {
            href.to_string()
        } else {
            format!("{}{}", self.base_url(), href)
        }
    }
}

/// Compiled form of a [`Locators`] set
#[derive(Debug, Clone)]
pub(crate) struct Selectors {
    results_table: Selector,
    result_row: Selector,
    row_marker: Selector,
    name: Selector,
    media_and_category: Selector,
    link: Selector,
    seeders_and_leechers: Selector,
    magnet_link: Selector,
    description: Selector,
    vip: Selector,
    trusted: Selector,
    detail_link: Selector,
    comments: Selector,
    comment_count: Regex,
}

impl Selectors {
    pub(crate) fn compile(locators: &Locators) -> Result<Self> {
        let comment_count = Regex::new(locators.comment_count).map_err(|e| {
            SiftError::Parse(format!(
                "invalid comment pattern '{}': {}",
                locators.comment_count, e
            ))
        })?;

        Ok(Self {
            results_table: selector(locators.results_table)?,
            result_row: selector(locators.result_row)?,
            row_marker: selector(locators.row_marker)?,
            name: selector(locators.name)?,
            media_and_category: selector(locators.media_and_category)?,
            link: selector("a")?,
            seeders_and_leechers: selector(locators.seeders_and_leechers)?,
            magnet_link: selector(locators.magnet_link)?,
            description: selector(locators.description)?,
            vip: selector(locators.vip)?,
            trusted: selector(locators.trusted)?,
            detail_link: selector(locators.detail_link)?,
            comments: selector(locators.comments)?,
            comment_count,
        })
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| SiftError::Parse(format!("invalid selector '{}': {:?}", css, e)))
}

/// Reads rows from a search page
///
/// `site` only labels extraction errors.
pub(crate) fn extract_table_rows(
    site: &str,
    locators: &Locators,
    selectors: &Selectors,
    document: &str,
) -> Result<Vec<Result<RawRow>>> {
    let html = Html::parse_document(document);

    let table = html
        .select(&selectors.results_table)
        .next()
        .ok_or_else(|| missing(site, locators.results_table))?;

    let rows = table
        .select(&selectors.result_row)
        .filter(|row| row.select(&selectors.row_marker).next().is_some())
        .map(|row| parse_row(site, locators, selectors, row))
        .collect();

    Ok(rows)
}

fn parse_row(
    site: &str,
    locators: &Locators,
    selectors: &Selectors,
    row: ElementRef<'_>,
) -> Result<RawRow> {
    let name = row
        .select(&selectors.name)
        .next()
        .map(element_text)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| missing(site, locators.name))?;

    let type_links: Vec<String> = row
        .select(&selectors.media_and_category)
        .next()
        .map(|cell| cell.select(&selectors.link).map(element_text).collect())
        .unwrap_or_default();

    let counts: Vec<String> = row
        .select(&selectors.seeders_and_leechers)
        .map(element_text)
        .collect();
    let (seeders, leechers) = match counts.as_slice() {
        [seeders, leechers, ..] => (seeders.clone(), leechers.clone()),
        _ => return Err(missing(site, locators.seeders_and_leechers)),
    };

    let magnet_link = row
        .select(&selectors.magnet_link)
        .next()
        .and_then(|link| link.value().attr("href"))
        .map(str::to_string)
        .ok_or_else(|| missing(site, locators.magnet_link))?;

    let description = row
        .select(&selectors.description)
        .next()
        .map(element_text)
        .ok_or_else(|| missing(site, locators.description))?;

    // "Uploaded 03-14 2019, Size 706.02 MiB, ULed by someone"
    let file_size = description
        .split(',')
        .nth(1)
        .map(|part| part.trim().to_string())
        .unwrap_or_default();
    let uploader = description
        .rsplit_once(" by ")
        .map(|(_, uploader)| uploader.trim().to_string())
        .filter(|uploader| !uploader.is_empty());

    let href = row
        .select(&selectors.detail_link)
        .next()
        .and_then(|link| link.value().attr("href"))
        .map(str::to_string);

    let comment_count = selectors
        .comment_count
        .captures(&row.html())
        .and_then(|caps| caps.get(1))
        .and_then(|count| count.as_str().parse().ok())
        .unwrap_or(0);

    Ok(RawRow {
        name,
        media_type: type_links.first().cloned().unwrap_or_default(),
        category: type_links.get(1).cloned().unwrap_or_default(),
        seeders,
        leechers,
        magnet_link: Some(magnet_link),
        file_size,
        vip_status: row.select(&selectors.vip).next().is_some(),
        trusted: row.select(&selectors.trusted).next().is_some(),
        href,
        uploader,
        comment_count,
    })
}

/// Reads comment texts from a detail page, newlines removed
pub(crate) fn extract_comment_texts(selectors: &Selectors, document: &str) -> Vec<String> {
    let html = Html::parse_document(document);

    html.select(&selectors.comments)
        .map(|comment| {
            comment
                .text()
                .collect::<String>()
                .replace(['\n', '\r'], "")
                .trim()
                .to_string()
        })
        .filter(|text| !text.is_empty())
        .collect()
}

/// Text content with runs of whitespace collapsed to one space
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn missing(site: &str, locator: &str) -> SiftError {
    SiftError::Extraction {
        site: site.to_string(),
        locator: locator.to_string(),
    }
}
