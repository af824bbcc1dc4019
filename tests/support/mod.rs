//! Shared fixtures for integration tests
//!
//! Builds services wired to in-process stub adapters and detectors, so no test
//! depends on a public grammar service being reachable.

#![allow(dead_code)]

use lingocheck::checker::mock::StubBackend;
use lingocheck::checker::http::HttpTransport;
use lingocheck::detect::mock::StubDetector;
use lingocheck::{AdapterSet, CheckService, LanguageDetector, LanguageProfile, LanguageRegistry, AUTO_TAG};
use std::sync::Arc;
use std::time::Duration;

/// Two-language table: `en` backed by `grammarbot` then `languagetool`, and the
/// auto profile backed by `languagetool` alone
pub fn english_profiles() -> Vec<LanguageProfile> {
    vec![
        LanguageProfile::new("en", "English", &["grammarbot", "languagetool"], "94%")
            .with_detector_tags(&["eng"]),
        LanguageProfile::new(AUTO_TAG, "Auto-detect (multilingual)", &["languagetool"], "80%"),
    ]
}

pub fn adapter_set(stubs: &[Arc<StubBackend>]) -> AdapterSet {
    stubs
        .iter()
        .fold(AdapterSet::new(), |set, stub| set.with(stub.clone()))
}

pub fn stub_service(
    profiles: Vec<LanguageProfile>,
    stubs: &[Arc<StubBackend>],
    detector: Arc<StubDetector>,
) -> CheckService {
    let adapters = adapter_set(stubs);
    let registry = LanguageRegistry::builder()
        .profiles(profiles)
        .build(&adapters)
        .expect("test registry is valid");

    CheckService::new(Arc::new(registry), adapters)
        .with_detector(Some(detector as Arc<dyn LanguageDetector>))
}

/// Transport pointed at a mock server path with a short timeout
pub fn transport(base_url: &str, path: &str) -> HttpTransport {
    HttpTransport::new(
        reqwest::Client::new(),
        format!("{}{}", base_url, path),
        Duration::from_secs(2),
    )
}
