//! Normalized search result records
//!
//! A [`SearchResult`] is built once from a [`RawRow`] right after a search page
//! is fetched. Its identity is the triple (name, uploader, magnet link): two
//! results with the same triple are equal and hash alike, whatever their
//! seeders, sizes or comments.

mod size;

pub use size::{file_size_to_bytes, format_file_size};

use crate::sites::RawRow;
use crate::{Result, SiftError};
use std::fmt;
use std::hash::{Hash, Hasher};

/// One normalized search result
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub name: String,
    pub media_type: String,
    pub category: String,
    pub seeders: u64,
    pub leechers: u64,

    /// Display form, e.g. "706 MiB"
    pub file_size: String,

    /// Byte count derived from `file_size`
    pub file_size_bytes: u64,

    pub vip_status: bool,
    pub trusted: bool,

    /// Relative path of the detail page
    pub href: Option<String>,

    pub comment_count: u32,

    /// Formatted comments, empty until enriched
    pub comments: Vec<String>,

    pub uploader: Option<String>,
    pub magnet_link: Option<String>,
}

/// Owned identity triple used for deduplication
pub type Identity = (String, Option<String>, Option<String>);

impl SearchResult {
    /// Builds a result from an extracted row
    ///
    /// # Returns
    ///
    /// * `Ok(SearchResult)` - Row converted
    /// * `Err(SiftError::Parse)` - Seeders, leechers or size are malformed
    pub fn from_raw(row: RawRow) -> Result<Self> {
        let seeders = parse_count("seeders", &row.seeders)?;
        let leechers = parse_count("leechers", &row.leechers)?;
        let file_size = format_file_size(&row.file_size)?;
        let file_size_bytes = file_size_to_bytes(&file_size)?;

        Ok(Self {
            name: row.name,
            media_type: row.media_type,
            category: row.category,
            seeders,
            leechers,
            file_size,
            file_size_bytes,
            vip_status: row.vip_status,
            trusted: row.trusted,
            href: row.href,
            comment_count: row.comment_count,
            comments: Vec::new(),
            uploader: row.uploader,
            magnet_link: row.magnet_link,
        })
    }

    /// Returns the (name, uploader, magnet link) triple
    pub fn identity(&self) -> Identity {
        (
            self.name.clone(),
            self.uploader.clone(),
            self.magnet_link.clone(),
        )
    }

    /// True when the page advertised at least one comment
    pub fn has_comments(&self) -> bool {
        self.comment_count >= 1
    }
}

fn parse_count(field: &str, text: &str) -> Result<u64> {
    text.trim().parse().map_err(|_| {
        SiftError::Parse(format!(
            "{} must be a non-negative integer, got '{}'",
            field, text
        ))
    })
}

impl PartialEq for SearchResult {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.uploader == other.uploader
            && self.magnet_link == other.magnet_link
    }
}

impl Eq for SearchResult {}

impl Hash for SearchResult {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.uploader.hash(state);
        self.magnet_link.hash(state);
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | Size: {} | Seed: {} | Leech: {} | Trusted: {} | VIP: {} | Uploader: {}",
            self.name,
            self.file_size,
            self.seeders,
            self.leechers,
            self.trusted,
            self.vip_status,
            self.uploader.as_deref().unwrap_or("-")
        )?;
        write!(
            f,
            "\n    ML: {}",
            self.magnet_link.as_deref().unwrap_or("-")
        )?;
        write!(f, "\n    Comments: [{}]", self.comments.join(", "))
    }
}

/// Numbers comments from 1 as `"{index}.) {text}"`
///
/// # Examples
///
/// ```
/// use seedsift::record::format_comments;
///
/// let formatted = format_comments(vec!["great find".into(), "thanks".into()]);
/// assert_eq!(formatted, vec!["1.) great find", "2.) thanks"]);
/// ```
pub fn format_comments(comments: Vec<String>) -> Vec<String> {
    comments
        .into_iter()
        .enumerate()
        .map(|(i, comment)| format!("{}.) {}", i + 1, comment))
        .collect()
}
