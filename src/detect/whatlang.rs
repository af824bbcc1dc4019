use async_trait::async_trait;
use tracing::debug;

use super::{DetectError, LanguageDetector};

/// Trigram detector returning ISO 639-3 codes (`eng`, `kor`, `cmn`, ...)
///
/// Guesses below `min_confidence` are still returned; whether a code is usable
/// is decided by the registry mapping, not here.
#[derive(Debug, Clone)]
pub struct WhatlangDetector {
    min_confidence: f64,
}

impl WhatlangDetector {
    pub fn new() -> Self {
        Self { min_confidence: 0.0 }
    }

    /// Logs guesses under this confidence as unreliable
    pub fn with_min_confidence(min_confidence: f64) -> Self {
        Self {
            min_confidence: min_confidence.clamp(0.0, 1.0),
        }
    }

    fn detect_sync(&self, text: &str) -> Result<String, DetectError> {
        let info = ::whatlang::detect(text).ok_or(DetectError::Unknown)?;
        let code = info.lang().code();

        if info.confidence() < self.min_confidence || !info.is_reliable() {
            debug!(
                code,
                confidence = info.confidence(),
                "Low-confidence language guess"
            );
        }

        Ok(code.to_string())
    }
}

impl Default for WhatlangDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LanguageDetector for WhatlangDetector {
    fn name(&self) -> &str {
        "whatlang"
    }

    async fn detect(&self, text: &str) -> Result<String, DetectError> {
        self.detect_sync(text)
    }
}
