use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::checker::Finding;
use crate::registry::{LanguageProfile, AUTO_TAG};

/// Merged result of one check request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateReport {
    /// First-seen order, duplicates removed
    pub findings: Vec<Finding>,
    /// Display name of the profile that was used
    pub language: String,
    pub accuracy: String,
    /// Tag actually used; the auto sentinel when no specific language matched
    pub detected_language: String,
    pub requested_language: String,
    /// Adapters that answered, in registry order
    #[serde(rename = "sources")]
    pub sources_consulted: Vec<String>,
    /// Adapters invoked, whether they answered or not
    pub sources_attempted: usize,
    pub checked_at: DateTime<Utc>,
    pub request_id: Uuid,
    #[serde(skip)]
    pub profile: Arc<LanguageProfile>,
    #[serde(skip)]
    pub duplicates_removed: usize,
}

impl AggregateReport {
    pub fn new(profile: Arc<LanguageProfile>, detected_language: impl Into<String>) -> Self {
        Self {
            findings: Vec::new(),
            language: profile.display_name.clone(),
            accuracy: profile.accuracy.clone(),
            detected_language: detected_language.into(),
            requested_language: AUTO_TAG.to_string(),
            sources_consulted: Vec::new(),
            sources_attempted: 0,
            checked_at: Utc::now(),
            request_id: Uuid::new_v4(),
            profile,
            duplicates_removed: 0,
        }
    }

    pub fn with_request(mut self, requested_language: impl Into<String>, request_id: Uuid) -> Self {
        self.requested_language = requested_language.into();
        self.request_id = request_id;
        self
    }

    /// No backend answered at all, as opposed to answering with nothing found
    pub fn all_sources_failed(&self) -> bool {
        self.sources_attempted > 0 && self.sources_consulted.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::RawFinding;

    fn profile() -> Arc<LanguageProfile> {
        Arc::new(LanguageProfile::new("en", "English", &["grammarbot", "languagetool"], "94%"))
    }

    #[test]
    fn test_report_json_shape() {
        let mut report = AggregateReport::new(profile(), "en").with_request("auto", Uuid::nil());
        report.findings.push(RawFinding::new(2, 5, "subject-verb disagreement").into_finding("grammarbot"));
        report.sources_consulted = vec!["grammarbot".to_string()];
        report.sources_attempted = 2;

        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["language"], "English");
        assert_eq!(json["accuracy"], "94%");
        assert_eq!(json["detectedLanguage"], "en");
        assert_eq!(json["requestedLanguage"], "auto");
        assert_eq!(json["sources"], serde_json::json!(["grammarbot"]));
        assert_eq!(json["sourcesAttempted"], 2);
        assert_eq!(json["requestId"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["findings"][0]["source"], "grammarbot");
        assert_eq!(json["findings"][0]["offset"], 2);
        assert!(json["checkedAt"].is_string());
        assert!(json.get("profile").is_none());
        assert!(json.get("duplicatesRemoved").is_none());
    }

    #[test]
    fn test_exhaustion_is_distinguishable_from_clean() {
        let mut report = AggregateReport::new(profile(), "en");
        report.sources_attempted = 2;
        assert!(report.is_clean());
        assert!(report.all_sources_failed());

        report.sources_consulted.push("languagetool".to_string());
        assert!(!report.all_sources_failed());
    }
}
