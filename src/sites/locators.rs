//! Per-variant locator sets
//!
//! A variant is described entirely by data: its URL pattern, whitespace token,
//! and the CSS selectors that find each field in its result table.

/// URL pattern and structural locators of one site variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locators {
    /// Path appended to the base URL; `{query}` is replaced by the query
    pub search_path: &'static str,

    /// Replacement for spaces in the query
    pub whitespace: &'static str,

    /// The table holding every result row
    pub results_table: &'static str,

    /// Candidate row elements inside the table
    pub result_row: &'static str,

    /// A row only counts as a result when it contains this element
    pub row_marker: &'static str,

    pub name: &'static str,

    /// Cell whose first and second links are the media type and category
    pub media_and_category: &'static str,

    /// Cells holding seeders then leechers
    pub seeders_and_leechers: &'static str,

    pub magnet_link: &'static str,

    /// Free-text description carrying the size and the uploader
    pub description: &'static str,

    pub vip: &'static str,
    pub trusted: &'static str,

    /// Link to the result's detail page
    pub detail_link: &'static str,

    /// Regex over the row markup; group 1 is the comment count
    pub comment_count: &'static str,

    /// Comment elements on a detail page
    pub comments: &'static str,
}

pub const THE_PIRATE_BAY: Locators = Locators {
    search_path: "/search/{query}/0/99/0",
    whitespace: "%20",
    results_table: "table#searchResult",
    result_row: "tr",
    row_marker: "div.detName",
    name: "div.detName",
    media_and_category: "td.vertTh",
    seeders_and_leechers: r#"td[align="right"]"#,
    magnet_link: r#"a[href^="magnet"]"#,
    description: "font.detDesc",
    vip: r#"img[alt="VIP"]"#,
    trusted: r#"img[alt="Trusted"]"#,
    detail_link: "a.detLink",
    comment_count: r"This torrent has (\d+) comments?\.",
    comments: "div.comment",
};
