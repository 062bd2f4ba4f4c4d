//! Human-readable size parsing (e.g., "1MB", "512KB").

use thiserror::Error;

/// Error parsing a size string.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid size '{input}': expected a byte count or a value like '1MB' or '512KB'")]
pub struct SizeParseError {
    input: String,
}

/// Parse a size string into bytes.
///
/// Bare numbers are bytes; `K`/`KB`, `M`/`MB` and `G`/`GB` suffixes are
/// powers of 1024. Case and surrounding whitespace are ignored.
///
/// ```
/// use bigip_pkg::config::parse_size;
///
/// assert_eq!(parse_size("1MB").unwrap(), 1024 * 1024);
/// assert_eq!(parse_size("512 kb").unwrap(), 512 * 1024);
/// assert_eq!(parse_size("4096").unwrap(), 4096);
/// ```
pub fn parse_size(s: &str) -> Result<u64, SizeParseError> {
    let err = || SizeParseError {
        input: s.to_string(),
    };

    let trimmed = s.trim();
    let upper = trimmed.to_ascii_uppercase();
    let digits_end = upper
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(upper.len());
    let (number, suffix) = upper.split_at(digits_end);

    let multiplier: u64 = match suffix.trim() {
        "" | "B" => 1,
        "K" | "KB" => 1024,
        "M" | "MB" => 1024 * 1024,
        "G" | "GB" => 1024 * 1024 * 1024,
        _ => return Err(err()),
    };

    let number: u64 = number.parse().map_err(|_| err())?;
    number.checked_mul(multiplier).ok_or_else(err)
}

/// Format a byte count using the largest whole unit.
pub fn format_size(bytes: u64) -> String {
    const GB: u64 = 1024 * 1024 * 1024;
    const MB: u64 = 1024 * 1024;
    const KB: u64 = 1024;

    match bytes {
        0 => "0".to_string(),
        b if b % GB == 0 => format!("{}GB", b / GB),
        b if b % MB == 0 => format!("{}MB", b / MB),
        b if b % KB == 0 => format!("{}KB", b / KB),
        b => b.to_string(),
    }
}
