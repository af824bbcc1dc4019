//! Small text helpers for scraped backends

use regex::Regex;
use std::sync::OnceLock;

fn tag_re() -> &'static Regex {
    static TAG_RE: OnceLock<Regex> = OnceLock::new();
    TAG_RE.get_or_init(|| Regex::new(r"(?i)<br\s*/?>|<[^>]+>").expect("valid regex"))
}

fn space_re() -> &'static Regex {
    static SPACE_RE: OnceLock<Regex> = OnceLock::new();
    SPACE_RE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

/// Removes tags, decodes the common entities and collapses whitespace
pub fn strip_markup(input: &str) -> String {
    let without_tags = tag_re().replace_all(input, " ");
    let decoded = decode_entities(&without_tags);
    space_re().replace_all(decoded.trim(), " ").into_owned()
}

pub fn decode_entities(input: &str) -> String {
    input
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Finds `needle` in `haystack` at or after character `from`; returns a char offset
pub fn find_chars(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    let start_byte = haystack
        .char_indices()
        .nth(from)
        .map(|(i, _)| i)
        .unwrap_or(haystack.len());
    haystack[start_byte..]
        .find(needle)
        .map(|rel| from + haystack[start_byte..start_byte + rel].chars().count())
}
