//! End-to-end checks through `CheckService` with stub adapters
//!
//! Covers the request pipeline: validation, resolution, concurrent fan-out,
//! partial failure and cross-source deduplication.

mod support;

use futures_util::future::join_all;
use lingocheck::checker::mock::StubBackend;
use lingocheck::detect::mock::StubDetector;
use lingocheck::{
    AdapterSet, CheckError, LanguageRegistry, LingoConfig, RawFinding, Unavailable, AUTO_TAG,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use support::{english_profiles, stub_service};

#[tokio::test]
async fn test_explicit_language_reports_stub_finding() {
    let grammarbot = Arc::new(StubBackend::with_findings(
        "grammarbot",
        vec![RawFinding::new(2, 5, "subject-verb disagreement")],
    ));
    let languagetool = Arc::new(StubBackend::clean("languagetool"));
    let detector = Arc::new(StubDetector::returning("eng"));
    let service = stub_service(
        english_profiles(),
        &[grammarbot.clone(), languagetool.clone()],
        detector.clone(),
    );

    let report = service.handle_check("He go to school", "en").await.unwrap();

    assert_eq!(report.findings.len(), 1);
    let finding = &report.findings[0];
    assert_eq!(finding.offset, 2);
    assert_eq!(finding.length, 5);
    assert_eq!(finding.message, "subject-verb disagreement");
    assert_eq!(finding.source_id, "grammarbot");
    assert_eq!(finding.original_text, lingocheck::checker::span_text("He go to school", 2, 5));
    assert_eq!(report.detected_language, "en");
    assert_eq!(detector.calls(), 0);
}

#[tokio::test]
async fn test_unmapped_detection_falls_back_to_default_profile() {
    let grammarbot = Arc::new(StubBackend::clean("grammarbot"));
    let languagetool = Arc::new(StubBackend::with_findings(
        "languagetool",
        vec![RawFinding::new(0, 2, "unknown word")],
    ));
    let service = stub_service(
        english_profiles(),
        &[grammarbot.clone(), languagetool.clone()],
        Arc::new(StubDetector::returning("tlh")),
    );

    let report = service.handle_check("He go to school", "auto").await.unwrap();

    assert_eq!(report.detected_language, AUTO_TAG);
    assert_eq!(report.language, "Auto-detect (multilingual)");
    assert_eq!(report.sources_consulted, vec!["languagetool"]);
    assert_eq!(report.sources_attempted, 1);
    assert_eq!(grammarbot.calls(), 0);
    assert_eq!(languagetool.last_language().as_deref(), Some(AUTO_TAG));
}

#[tokio::test]
async fn test_detector_failure_never_fails_the_request() {
    let languagetool = Arc::new(StubBackend::clean("languagetool"));
    let service = stub_service(
        english_profiles(),
        &[Arc::new(StubBackend::clean("grammarbot")), languagetool.clone()],
        Arc::new(StubDetector::failing()),
    );

    let report = service.handle_check("anything at all", "").await.unwrap();

    assert_eq!(report.detected_language, AUTO_TAG);
    assert_eq!(languagetool.calls(), 1);
}

#[tokio::test]
async fn test_detected_language_selects_mapped_profile() {
    let grammarbot = Arc::new(StubBackend::clean("grammarbot"));
    let languagetool = Arc::new(StubBackend::clean("languagetool"));
    let service = stub_service(
        english_profiles(),
        &[grammarbot.clone(), languagetool.clone()],
        Arc::new(StubDetector::returning("eng")),
    );

    let report = service.handle_check("She go to school", "auto").await.unwrap();

    assert_eq!(report.detected_language, "en");
    assert_eq!(report.requested_language, AUTO_TAG);
    assert_eq!(report.sources_consulted, vec!["grammarbot", "languagetool"]);
    assert_eq!(grammarbot.last_language().as_deref(), Some("en"));
}

#[tokio::test]
async fn test_identical_findings_collapse_to_first_source() {
    let typo = || vec![RawFinding::new(0, 3, "typo")];
    let service = stub_service(
        english_profiles(),
        &[
            Arc::new(StubBackend::with_findings("grammarbot", typo())),
            Arc::new(StubBackend::with_findings("languagetool", typo())),
        ],
        Arc::new(StubDetector::returning("eng")),
    );

    let report = service.handle_check("teh cat", "en").await.unwrap();

    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.findings[0].source_id, "grammarbot");
    assert_eq!(report.duplicates_removed, 1);
    assert_eq!(report.sources_consulted.len(), 2);
}

#[tokio::test]
async fn test_first_source_wins_even_when_it_answers_last() {
    let typo = || vec![RawFinding::new(0, 3, "typo")];
    let service = stub_service(
        english_profiles(),
        &[
            Arc::new(StubBackend::with_findings("grammarbot", typo()).delayed(Duration::from_millis(150))),
            Arc::new(StubBackend::with_findings("languagetool", typo())),
        ],
        Arc::new(StubDetector::returning("eng")),
    );

    let report = service.handle_check("teh cat", "en").await.unwrap();

    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.findings[0].source_id, "grammarbot");
}

#[tokio::test]
async fn test_different_messages_on_same_span_are_kept() {
    let service = stub_service(
        english_profiles(),
        &[
            Arc::new(StubBackend::with_findings("grammarbot", vec![RawFinding::new(0, 3, "typo")])),
            Arc::new(StubBackend::with_findings(
                "languagetool",
                vec![RawFinding::new(0, 3, "Possible spelling mistake found.")],
            )),
        ],
        Arc::new(StubDetector::returning("eng")),
    );

    let report = service.handle_check("teh cat", "en").await.unwrap();

    assert_eq!(report.findings.len(), 2);
    assert_eq!(report.findings[0].source_id, "grammarbot");
    assert_eq!(report.findings[1].source_id, "languagetool");
}

#[tokio::test]
async fn test_failed_adapter_is_excluded_but_attempted() {
    let service = stub_service(
        english_profiles(),
        &[
            Arc::new(StubBackend::unavailable("grammarbot")),
            Arc::new(StubBackend::with_findings("languagetool", vec![RawFinding::new(4, 3, "agreement")])),
        ],
        Arc::new(StubDetector::returning("eng")),
    );

    let report = service.handle_check("She go to school", "en").await.unwrap();

    assert_eq!(report.sources_consulted, vec!["languagetool"]);
    assert_eq!(report.sources_attempted, 2);
    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.findings[0].source_id, "languagetool");
}

#[tokio::test]
async fn test_every_adapter_failing_still_yields_a_report() {
    let service = stub_service(
        english_profiles(),
        &[
            Arc::new(StubBackend::failing("grammarbot", Unavailable::Status { status: 503 })),
            Arc::new(StubBackend::panicking("languagetool")),
        ],
        Arc::new(StubDetector::returning("eng")),
    );

    let report = service.handle_check("She go to school", "en").await.unwrap();

    assert!(report.findings.is_empty());
    assert!(report.sources_consulted.is_empty());
    assert_eq!(report.sources_attempted, 2);
    assert!(report.all_sources_failed());
}

#[tokio::test]
async fn test_empty_text_never_reaches_adapters() {
    let grammarbot = Arc::new(StubBackend::clean("grammarbot"));
    let languagetool = Arc::new(StubBackend::clean("languagetool"));
    let detector = Arc::new(StubDetector::returning("eng"));
    let service = stub_service(
        english_profiles(),
        &[grammarbot.clone(), languagetool.clone()],
        detector.clone(),
    );

    let err = service.handle_check("", "auto").await.unwrap_err();

    assert_eq!(err, CheckError::EmptyText);
    assert!(err.is_client_error());
    assert_eq!(grammarbot.calls() + languagetool.calls(), 0);
    assert_eq!(detector.calls(), 0);
}

#[tokio::test]
async fn test_slow_adapter_is_cut_off_by_request_deadline() {
    let service = stub_service(
        english_profiles(),
        &[
            Arc::new(StubBackend::clean("grammarbot").delayed(Duration::from_secs(30))),
            Arc::new(StubBackend::with_findings("languagetool", vec![RawFinding::new(0, 3, "typo")])),
        ],
        Arc::new(StubDetector::returning("eng")),
    )
    .with_request_deadline(Duration::from_millis(300));

    let started = Instant::now();
    let report = service.handle_check("teh cat", "en").await.unwrap();

    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(report.sources_consulted, vec!["languagetool"]);
    assert_eq!(report.sources_attempted, 2);
}

#[tokio::test]
async fn test_concurrent_requests_are_isolated() {
    let service = stub_service(
        english_profiles(),
        &[
            Arc::new(StubBackend::with_findings("grammarbot", vec![RawFinding::new(0, 3, "typo")])),
            Arc::new(StubBackend::clean("languagetool")),
        ],
        Arc::new(StubDetector::returning("eng")),
    );

    let requests = (0..8).map(|i| {
        let service = service.clone();
        async move {
            if i % 2 == 0 {
                service.handle_check("teh cat", "en").await
            } else {
                service.handle_check("", "en").await
            }
        }
    });
    let results = join_all(requests).await;

    for (i, result) in results.into_iter().enumerate() {
        if i % 2 == 0 {
            assert_eq!(result.unwrap().findings.len(), 1);
        } else {
            assert_eq!(result.unwrap_err(), CheckError::EmptyText);
        }
    }
}

#[test]
fn test_builtin_profiles_reference_registered_adapters() {
    let adapters = AdapterSet::builtin(&LingoConfig::baseline()).unwrap();
    let registry = LanguageRegistry::with_defaults(&adapters).unwrap();

    for profile in registry.profiles() {
        let looked_up = registry.lookup(&profile.tag);
        assert_eq!(looked_up.tag, profile.tag);
        for backend in &looked_up.backend_ids {
            assert!(adapters.contains(backend), "{} -> {}", profile.tag, backend);
        }
    }
}
