use serde::Serialize;

/// Configuration record for one language
///
/// Profiles are built once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageProfile {
    pub tag: String,
    #[serde(rename = "name")]
    pub display_name: String,
    /// Backend ids in invocation priority order
    #[serde(rename = "backends")]
    pub backend_ids: Vec<String>,
    pub accuracy: String,
    /// External detector codes that map onto this profile
    pub detector_tags: Vec<String>,
}

impl LanguageProfile {
    pub fn new(
        tag: impl Into<String>,
        display_name: impl Into<String>,
        backend_ids: &[&str],
        accuracy: impl Into<String>,
    ) -> Self {
        Self {
            tag: tag.into().trim().to_lowercase(),
            display_name: display_name.into(),
            backend_ids: backend_ids.iter().map(|id| id.to_string()).collect(),
            accuracy: accuracy.into(),
            detector_tags: Vec::new(),
        }
    }

    /// Adds detector codes, skipping ones already present
    pub fn with_detector_tags(mut self, tags: &[&str]) -> Self {
        for tag in tags {
            let tag = tag.trim().to_lowercase();
            if !tag.is_empty() && !self.detector_tags.contains(&tag) {
                self.detector_tags.push(tag);
            }
        }
        self
    }

    pub fn claims_detector_tag(&self, code: &str) -> bool {
        self.detector_tags.iter().any(|t| t.eq_ignore_ascii_case(code))
    }
}
