//! Pusan National University Korean speller adapter
//!
//! The speller only answers with an HTML page. Its findings are embedded in an
//! inline script as `data = [ {"str": ..., "errInfo": [...]}, ... ];`, one
//! entry per chunk of the submitted text. Offsets inside `errInfo` are relative
//! to the chunk, so each chunk is re-located in the original text.

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;
use tracing::{debug, warn};

use super::backend::{blank_input, CheckerBackend, ResponseKind};
use super::error::Unavailable;
use super::finding::{Category, NormalizedPayload, RawFinding};
use super::http::{read_text, HttpTransport};
use super::kind::BackendKind;
use super::markup::{find_chars, strip_markup};

fn data_re() -> &'static Regex {
    static DATA_RE: OnceLock<Regex> = OnceLock::new();
    DATA_RE.get_or_init(|| Regex::new(r"(?s)\bdata\s*=\s*(\[.*?\]);").expect("valid regex"))
}

#[derive(Debug, Deserialize)]
struct SpellChunk {
    #[serde(rename = "str", default)]
    chunk: String,
    #[serde(rename = "errInfo", default)]
    errors: Vec<SpellError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpellError {
    start: usize,
    end: usize,
    #[serde(default)]
    org_str: String,
    #[serde(default)]
    cand_word: String,
    #[serde(default)]
    help: String,
    #[serde(default)]
    correct_method: Option<u32>,
}

impl SpellError {
    fn category(&self) -> Category {
        match self.correct_method {
            Some(1) => Category::Spelling,
            Some(2) => Category::Spacing,
            Some(3) => Category::Info,
            _ => Category::Grammar,
        }
    }

    fn into_raw(self, base: usize) -> RawFinding {
        let category = self.category();
        let suggestions: Vec<String> = self
            .cand_word
            .split('|')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        RawFinding::new(
            base + self.start,
            self.end.saturating_sub(self.start),
            strip_markup(&self.help),
        )
        .with_original_text(self.org_str)
        .with_suggestions(suggestions)
        .with_category(category)
    }
}

/// Extracts findings from a speller result page
///
/// Pages without a recognisable `data` block yield no findings.
pub fn parse_result_page(html: &str, text: &str) -> Vec<RawFinding> {
    let mut findings = Vec::new();
    let mut cursor = 0;

    for capture in data_re().captures_iter(html) {
        let chunks: Vec<SpellChunk> = match serde_json::from_str(&capture[1]) {
            Ok(chunks) => chunks,
            Err(e) => {
                debug!(error = %e, "Skipping unparsable speller data block");
                continue;
            }
        };

        for chunk in chunks {
            let base = find_chars(text, chunk.chunk.trim(), cursor).unwrap_or(cursor);
            findings.extend(
                chunk
                    .errors
                    .into_iter()
                    .map(|e| e.into_raw(base).fill_original_from(text)),
            );
            cursor = base + chunk.chunk.trim().chars().count();
        }
    }

    findings
}

pub struct PusanBackend {
    transport: HttpTransport,
}

impl PusanBackend {
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl CheckerBackend for PusanBackend {
    fn id(&self) -> &str {
        BackendKind::Pusan.id()
    }

    fn kind(&self) -> ResponseKind {
        ResponseKind::Markup
    }

    async fn check(&self, text: &str, _language: &str) -> Result<NormalizedPayload, Unavailable> {
        if let Some(empty) = blank_input(self.id(), text) {
            return Ok(empty);
        }

        let response = self.transport.post_form(&[("text1", text)]).await?;
        let html = read_text(response).await?;
        let findings = parse_result_page(&html, text);

        if findings.is_empty() && !html.contains("errInfo") {
            warn!(backend = self.id(), "No speller data found in response page");
        }

        Ok(NormalizedPayload::new(self.id(), findings))
    }
}
