use crate::domain::model::UNKNOWN_INSTITUTION;
use regex::Regex;
use std::sync::LazyLock;

// Lazy prefix, anchored: the last parenthesized group at the end is the institution.
static HEADER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s*\(([^)]+)\)$").expect("header pattern is valid"));

/// Split a `Name (Organization)` header into program name and institution.
///
/// Headers without a trailing group come back verbatim with
/// [`UNKNOWN_INSTITUTION`]. Never fails.
pub fn parse_header(header: &str) -> (String, String) {
    let Some(caps) = HEADER_PATTERN.captures(header) else {
        return (header.to_string(), UNKNOWN_INSTITUTION.to_string());
    };

    let name = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
    let institution = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();

    let name = if name.is_empty() { header } else { name };
    let institution = if institution.is_empty() {
        UNKNOWN_INSTITUTION
    } else {
        institution
    };

    (name.to_string(), institution.to_string())
}
