//! File size parsing
//!
//! Sizes are printed by index sites in free text such as
//! `"Size 706.02\u{a0}MiB"`. The display form keeps the first
//! `<number> <unit>` pair; the byte count follows decimal (KB, MB, ...) or
//! binary (KiB, MiB, ...) multipliers and is truncated toward zero.

use crate::{Result, SiftError};
use regex::Regex;
use std::sync::OnceLock;

fn size_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(\d+(?:\.\d+)?)\s*(TiB|GiB|MiB|KiB|TB|GB|MB|KB|B)\b")
            .expect("static size pattern compiles")
    })
}

/// Extracts the `"<number> <unit>"` display form from free text
///
/// # Examples
///
/// ```
/// use seedsift::record::format_file_size;
///
/// assert_eq!(format_file_size("Size 706\u{a0}MiB").unwrap(), "706 MiB");
/// ```
pub fn format_file_size(text: &str) -> Result<String> {
    let caps = size_pattern()
        .captures(text)
        .ok_or_else(|| SiftError::Parse(format!("no file size unit in '{}'", text.trim())))?;
    Ok(format!("{} {}", &caps[1], &caps[2]))
}

/// Converts a size such as `"706 MiB"` to bytes
///
/// # Examples
///
/// ```
/// use seedsift::record::file_size_to_bytes;
///
/// assert_eq!(file_size_to_bytes("706 MiB").unwrap(), 740_294_656);
/// assert!(file_size_to_bytes("706").is_err());
/// ```
pub fn file_size_to_bytes(size: &str) -> Result<u64> {
    let caps = size_pattern()
        .captures(size)
        .ok_or_else(|| SiftError::Parse(format!("no file size unit in '{}'", size.trim())))?;

    let number: f64 = caps[1]
        .parse()
        .map_err(|_| SiftError::Parse(format!("invalid file size number '{}'", &caps[1])))?;

    Ok((number * unit_multiplier(&caps[2])) as u64)
}

fn unit_multiplier(unit: &str) -> f64 {
    match unit {
        "KB" => 1e3,
        "MB" => 1e6,
        "GB" => 1e9,
        "TB" => 1e12,
        "KiB" => 1024.0,
        "MiB" => 1024.0 * 1024.0,
        "GiB" => 1024.0 * 1024.0 * 1024.0,
        "TiB" => 1024.0 * 1024.0 * 1024.0 * 1024.0,
        _ => 1.0,
    }
}
