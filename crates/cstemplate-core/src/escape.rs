//! Escaping applied to values before they reach the API client.
//!
//! The server treats `%` in search terms as a LIKE wildcard, so a literal
//! percent sign must travel as `%25`. Source URLs are pre-escaped the same
//! way so the management server receives them as a single opaque value.

/// Escape every `%` in a keyword / ostype / zone search term.
pub fn escape_keyword(term: &str) -> String {
    term.replace('%', "%25")
}

/// Escape `:` then `/` in a template source location.
pub fn escape_source_url(url: &str) -> String {
    url.replace(':', "%3A").replace('/', "%2F")
}
