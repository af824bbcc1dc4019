//! LanguageTool-style `matches` response schema
//!
//! LanguageTool and GrammarBot share this layout:
//!
//! ```json
//! { "matches": [ { "offset": 0, "length": 3, "message": "...",
//!                  "shortMessage": "...", "replacements": [ { "value": "..." } ],
//!                  "rule": { "id": "...", "category": { "id": "TYPOS" } } } ] }
//! ```
//!
//! `offset` and `length` count UTF-16 code units and are rebased onto
//! characters before anything else sees them.

use serde::Deserialize;

use super::finding::{utf16_span_to_chars, Category, RawFinding};

#[derive(Debug, Deserialize)]
pub struct MatchesResponse {
    #[serde(default)]
    pub matches: Vec<Match>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub offset: usize,
    pub length: usize,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub short_message: Option<String>,
    #[serde(default)]
    pub replacements: Vec<Replacement>,
    #[serde(default)]
    pub rule: Option<Rule>,
}

#[derive(Debug, Deserialize)]
pub struct Replacement {
    pub value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub issue_type: Option<String>,
    #[serde(default)]
    pub category: Option<RuleCategory>,
}

#[derive(Debug, Deserialize)]
pub struct RuleCategory {
    #[serde(default)]
    pub id: Option<String>,
}

impl Match {
    fn category(&self) -> Category {
        let Some(rule) = &self.rule else {
            return Category::Grammar;
        };
        rule.category
            .as_ref()
            .and_then(|c| c.id.as_deref())
            .or(rule.issue_type.as_deref())
            .map(Category::from_label)
            .unwrap_or(Category::Grammar)
    }

    pub fn into_raw(self, text: &str) -> RawFinding {
        let category = self.category();
        let (offset, length) = utf16_span_to_chars(text, self.offset, self.length);
        let mut raw = RawFinding::new(offset, length, self.message)
            .with_suggestions(self.replacements.into_iter().map(|r| r.value))
            .with_category(category)
            .fill_original_from(text);
        if let Some(short) = self.short_message {
            raw = raw.with_short_message(short);
        }
        raw
    }
}

impl MatchesResponse {
    pub fn into_findings(self, text: &str) -> Vec<RawFinding> {
        self.matches.into_iter().map(|m| m.into_raw(text)).collect()
    }
}
