//! Text normalization for values displayed on the dashboard
//!
//! # Examples
//!
//! ```
//! use shop_creators_scraper::helpers::{parse_magnitude, strip_currency};
//!
//! assert_eq!(parse_magnitude("1.5k"), Some(1500.0));
//! assert_eq!(parse_magnitude(strip_currency("$2m")), Some(2_000_000.0));
//! assert_eq!(parse_magnitude("abc"), None);
//! ```

const CURRENCY_MARKER: char = '$';

/// Remove a leading currency marker (and surrounding whitespace)
pub fn strip_currency(value: &str) -> &str {
    let value = value.trim();
    value.strip_prefix(CURRENCY_MARKER).unwrap_or(value).trim_start()
}

/// Parse a number with an optional magnitude suffix ('k' = thousand, 'm' = million).
///
/// Returns `None` for anything that is not a finite number; callers treat
/// that as unknown rather than zero.
pub fn parse_magnitude(value: &str) -> Option<f64> {
    let value = value.trim();

    let (number, scale) = match value.char_indices().last() {
        Some((i, 'k' | 'K')) => (&value[..i], 1_000.0),
        Some((i, 'm' | 'M')) => (&value[..i], 1_000_000.0),
        _ => (value, 1.0),
    };

    number
        .trim_end()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(|n| n * scale)
}

/// Display name comparison used to match search results: trimmed, case-insensitive
pub fn same_shop_name(query: &str, displayed: &str) -> bool {
    query.trim().to_lowercase() == displayed.trim().to_lowercase()
}

/// First line of a multi-line cell, trimmed
pub fn first_line(text: &str) -> &str {
    text.trim().lines().next().unwrap_or("").trim()
}
