//! Output module for rendering ranked results
//!
//! This module handles:
//! - The banner logged as each site is searched
//! - The one-line-per-rank rendering of the final aggregate

use crate::record::SearchResult;
use std::io::{self, Write};

const BANNER_WIDTH: usize = 24;

/// Banner naming a site, e.g. `"###... ThePirateBay ...###"`
pub fn site_banner(name: &str) -> String {
    let border = "#".repeat(BANNER_WIDTH);
    format!("{} {} {}", border, name, border)
}

/// Renders each result as `"{rank}) {result}"`, ranks starting at 1
pub fn render_results(results: &[SearchResult]) -> Vec<String> {
    results
        .iter()
        .enumerate()
        .map(|(i, result)| format!("{}) {}", i + 1, result))
        .collect()
}

/// Writes the rendered results to `out`
pub fn write_results<W: Write>(out: &mut W, results: &[SearchResult]) -> io::Result<()> {
    for line in render_results(results) {
        writeln!(out, "{}", line)?;
    }
    out.flush()
}
