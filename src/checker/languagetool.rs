//! LanguageTool and GrammarBot adapters
//!
//! Both services accept a form-encoded `text` + `language` body and answer with
//! the `matches` schema from [`super::matches`].

use async_trait::async_trait;
use tracing::debug;

use super::backend::{blank_input, CheckerBackend};
use super::error::Unavailable;
use super::finding::NormalizedPayload;
use super::http::{read_json, HttpTransport};
use super::kind::BackendKind;
use super::matches::MatchesResponse;
use crate::registry::AUTO_TAG;

/// LanguageTool public API, used as the multilingual fallback
pub struct LanguageToolBackend {
    transport: HttpTransport,
}

impl LanguageToolBackend {
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    /// LanguageTool takes the profile tag directly and understands `auto` itself
    fn language_param(language: &str) -> &str {
        if language.is_empty() {
            AUTO_TAG
        } else {
            language
        }
    }
}

#[async_trait]
impl CheckerBackend for LanguageToolBackend {
    fn id(&self) -> &str {
        BackendKind::LanguageTool.id()
    }

    async fn check(&self, text: &str, language: &str) -> Result<NormalizedPayload, Unavailable> {
        if let Some(empty) = blank_input(self.id(), text) {
            return Ok(empty);
        }

        let language = Self::language_param(language);
        debug!(language, chars = text.chars().count(), "Querying LanguageTool");

        let response = self
            .transport
            .post_form(&[("text", text), ("language", language)])
            .await?;
        let body: MatchesResponse = read_json(response).await?;

        Ok(NormalizedPayload::new(self.id(), body.into_findings(text)))
    }
}

/// GrammarBot English checker
pub struct GrammarBotBackend {
    transport: HttpTransport,
}

impl GrammarBotBackend {
    const LANGUAGE: &'static str = "en-US";

    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl CheckerBackend for GrammarBotBackend {
    fn id(&self) -> &str {
        BackendKind::GrammarBot.id()
    }

    async fn check(&self, text: &str, _language: &str) -> Result<NormalizedPayload, Unavailable> {
        if let Some(empty) = blank_input(self.id(), text) {
            return Ok(empty);
        }

        let response = self
            .transport
            .post_form(&[("text", text), ("language", Self::LANGUAGE)])
            .await?;
        let body: MatchesResponse = read_json(response).await?;

        Ok(NormalizedPayload::new(self.id(), body.into_findings(text)))
    }
}
