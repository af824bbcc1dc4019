//! Normalized finding types shared by every checker backend
//!
//! Backends speak very different dialects (LanguageTool-style `matches`, loose
//! `errors` arrays, scraped HTML). Everything is funnelled into [`RawFinding`]
//! inside the adapter, and stamped with provenance by the aggregator to become a
//! [`Finding`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse classification of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Spelling,
    Grammar,
    Spacing,
    Punctuation,
    Style,
    Info,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Spelling => "spelling",
            Category::Grammar => "grammar",
            Category::Spacing => "spacing",
            Category::Punctuation => "punctuation",
            Category::Style => "style",
            Category::Info => "info",
        }
    }

    /// Maps a backend-specific category or error-type label onto the shared taxonomy
    ///
    /// Unknown labels are treated as grammar issues, which is what every backend
    /// in the set reports when it has nothing more specific to say.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "typos" | "typo" | "misspelling" | "spelling" | "spell" => Category::Spelling,
            "whitespace" | "typography" | "spacing" | "space" | "space_spell" => {
                Category::Spacing
            }
            "punctuation" => Category::Punctuation,
            "style" | "redundancy" | "stylistic" | "register" => Category::Style,
            "info" | "hint" | "doubt" => Category::Info,
            _ => Category::Grammar,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A finding as produced by an adapter, before provenance is attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFinding {
    /// Character offset of the flagged span
    pub offset: usize,
    /// Length of the flagged span in characters
    pub length: usize,
    pub original_text: String,
    pub suggestions: Vec<String>,
    pub message: String,
    pub short_message: Option<String>,
    pub category: Category,
}

impl RawFinding {
    pub fn new(offset: usize, length: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            length,
            original_text: String::new(),
            suggestions: Vec::new(),
            message: message.into(),
            short_message: None,
            category: Category::Grammar,
        }
    }

    pub fn with_original_text(mut self, text: impl Into<String>) -> Self {
        self.original_text = text.into();
        self
    }

    pub fn with_suggestions<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggestions = suggestions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_short_message(mut self, short: impl Into<String>) -> Self {
        let short = short.into();
        self.short_message = if short.trim().is_empty() {
            None
        } else {
            Some(short)
        };
        self
    }

    /// Fills `original_text` from the checked text when the backend left it empty
    pub fn fill_original_from(mut self, text: &str) -> Self {
        if self.original_text.is_empty() {
            self.original_text = span_text(text, self.offset, self.length);
        }
        self
    }

    /// Attaches provenance
    pub fn into_finding(self, source_id: &str) -> Finding {
        Finding {
            offset: self.offset,
            length: self.length,
            original_text: self.original_text,
            suggestions: self.suggestions,
            message: self.message,
            short_message: self.short_message,
            category: self.category,
            source_id: source_id.to_string(),
        }
    }
}

/// One located issue in the merged report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub offset: usize,
    pub length: usize,
    pub original_text: String,
    pub suggestions: Vec<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub short_message: Option<String>,
    pub category: Category,
    /// Adapter that reported this finding first
    #[serde(rename = "source")]
    pub source_id: String,
}

impl Finding {
    /// Identity used for cross-source deduplication
    ///
    /// Source and category are deliberately not part of the key.
    pub fn dedup_key(&self) -> (usize, usize, &str) {
        (self.offset, self.length, self.message.as_str())
    }
}

/// Adapter output: the findings of one backend for one text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPayload {
    pub source_id: String,
    pub findings: Vec<RawFinding>,
}

impl NormalizedPayload {
    pub fn new(source_id: impl Into<String>, findings: Vec<RawFinding>) -> Self {
        Self {
            source_id: source_id.into(),
            findings,
        }
    }

    /// A clean result: the backend answered and found nothing
    pub fn empty(source_id: impl Into<String>) -> Self {
        Self::new(source_id, Vec::new())
    }
}

/// Extracts `length` characters starting at character `offset`
pub fn span_text(text: &str, offset: usize, length: usize) -> String {
    text.chars().skip(offset).take(length).collect()
}

/// Rebases a span counted in UTF-16 code units onto character offsets
///
/// Positions past the end of `text` stay past the end.
pub fn utf16_span_to_chars(text: &str, offset: usize, length: usize) -> (usize, usize) {
    let to_char = |target: usize| {
        let mut units = 0;
        for (index, ch) in text.chars().enumerate() {
            if units >= target {
                return index;
            }
            units += ch.len_utf16();
        }
        text.chars().count() + target.saturating_sub(units)
    };

    let start = to_char(offset);
    let end = to_char(offset.saturating_add(length));
    (start, end.saturating_sub(start))
}

/// Converts a byte index into `text` to a character offset
pub fn char_offset(text: &str, byte_index: usize) -> usize {
    text.get(..byte_index)
        .map(|prefix| prefix.chars().count())
        .unwrap_or_else(|| text.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        typos = { "TYPOS", Category::Spelling },
        misspelling = { "misspelling", Category::Spelling },
        whitespace = { "WHITESPACE", Category::Spacing },
        daum_space = { "space", Category::Spacing },
        punctuation = { "PUNCTUATION", Category::Punctuation },
        redundancy = { "REDUNDANCY", Category::Style },
        doubt = { "doubt", Category::Info },
        unknown = { "CONFUSED_WORDS", Category::Grammar },
    )]
    fn test_category_from_label(label: &str, expected: Category) {
        assert_eq!(Category::from_label(label), expected);
    }

    #[test]
    fn test_span_text_is_char_based() {
        let text = "안녕하세요 world";
        assert_eq!(span_text(text, 0, 2), "안녕");
        assert_eq!(span_text(text, 6, 5), "world");
        assert_eq!(span_text(text, 40, 3), "");
    }

    #[parameterized(
        ascii = { "teh cat", 4, 3, (4, 3) },
        emoji_prefix = { "😀 teh cat", 3, 3, (2, 3) },
        emoji_inside = { "a😀b", 1, 2, (1, 1) },
        hangul = { "안녕 world", 3, 5, (3, 5) },
        past_end = { "😀", 4, 1, (3, 1) },
    )]
    fn test_utf16_span_to_chars(text: &str, offset: usize, length: usize, expected: (usize, usize)) {
        assert_eq!(utf16_span_to_chars(text, offset, length), expected);
    }

    #[test]
    fn test_char_offset() {
        let text = "한국 text";
        let byte = text.find("text").unwrap();
        assert_eq!(char_offset(text, byte), 3);
    }

    #[test]
    fn test_fill_original_keeps_backend_text() {
        let raw = RawFinding::new(0, 3, "typo")
            .with_original_text("teh")
            .fill_original_from("the cat");
        assert_eq!(raw.original_text, "teh");

        let raw = RawFinding::new(4, 3, "typo").fill_original_from("the cat");
        assert_eq!(raw.original_text, "cat");
    }

    #[test]
    fn test_blank_short_message_is_dropped() {
        let raw = RawFinding::new(0, 1, "m").with_short_message("  ");
        assert!(raw.short_message.is_none());
    }

    #[test]
    fn test_finding_serializes_source_field() {
        let finding = RawFinding::new(2, 5, "subject-verb disagreement")
            .with_suggestions(["are"])
            .into_finding("grammarbot");
        let json = serde_json::to_value(&finding).unwrap();

        assert_eq!(json["source"], "grammarbot");
        assert_eq!(json["originalText"], "");
        assert_eq!(json["category"], "grammar");
        assert!(json.get("shortMessage").is_none());
    }
}
