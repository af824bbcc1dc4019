//! Adapters for the regional JSON checkers (Enno, Manfen, rechtschreibpruefung24, pr-cy)
//!
//! These services take a JSON body with the text plus a few fixed fields and
//! return a list of findings under a service-specific key. The list records are
//! read leniently, see [`super::lenient`].

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;

use super::backend::{blank_input, CheckerBackend};
use super::error::Unavailable;
use super::finding::NormalizedPayload;
use super::http::{read_json, HttpTransport};
use super::kind::BackendKind;
use super::lenient::extract_findings;

/// A JSON checker parameterised by its request fields and result key
pub struct JsonApiBackend {
    kind: BackendKind,
    transport: HttpTransport,
    extra_fields: &'static [(&'static str, &'static str)],
    result_field: &'static str,
}

impl JsonApiBackend {
    /// Japanese checker: `{text}` -> `errors`
    pub fn enno(transport: HttpTransport) -> Self {
        Self {
            kind: BackendKind::Enno,
            transport,
            extra_fields: &[],
            result_field: "errors",
        }
    }

    /// Chinese checker: `{text, mode: "grammar"}` -> `corrections`
    pub fn manfen(transport: HttpTransport) -> Self {
        Self {
            kind: BackendKind::Manfen,
            transport,
            extra_fields: &[("mode", "grammar")],
            result_field: "corrections",
        }
    }

    /// German checker: `{text, language: "de"}` -> `matches`
    pub fn rechtschreibung24(transport: HttpTransport) -> Self {
        Self {
            kind: BackendKind::Rechtschreibung24,
            transport,
            extra_fields: &[("language", "de")],
            result_field: "matches",
        }
    }

    /// Russian checker: `{text, language: "ru"}` -> `errors`
    pub fn prcy(transport: HttpTransport) -> Self {
        Self {
            kind: BackendKind::Prcy,
            transport,
            extra_fields: &[("language", "ru")],
            result_field: "errors",
        }
    }

    pub fn result_field(&self) -> &str {
        self.result_field
    }

    fn request_body(&self, text: &str) -> Value {
        let mut body = Map::new();
        body.insert("text".to_string(), Value::String(text.to_string()));
        for (key, value) in self.extra_fields {
            body.insert((*key).to_string(), Value::String((*value).to_string()));
        }
        Value::Object(body)
    }
}

#[async_trait]
impl CheckerBackend for JsonApiBackend {
    fn id(&self) -> &str {
        self.kind.id()
    }

    async fn check(&self, text: &str, _language: &str) -> Result<NormalizedPayload, Unavailable> {
        if let Some(empty) = blank_input(self.id(), text) {
            return Ok(empty);
        }

        debug!(backend = self.id(), url = self.transport.url(), "Querying JSON checker");

        let response = self.transport.post_json(&self.request_body(text)).await?;
        let body: Value = read_json(response).await?;
        let findings = extract_findings(&body, self.result_field, text)?;

        Ok(NormalizedPayload::new(self.id(), findings))
    }
}
