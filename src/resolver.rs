//! Language resolution
//!
//! Turns a requested language selector into a concrete tag and profile.
//! An explicit, known tag always wins; otherwise the detector is consulted
//! once, and every failure path ends in the default profile.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::detect::LanguageDetector;
use crate::observe::{CheckEvent, CheckObserver, NoOpObserver};
use crate::registry::{LanguageProfile, LanguageRegistry, AUTO_TAG};

const DEFAULT_DETECT_TIMEOUT: Duration = Duration::from_millis(500);

/// Outcome of resolving a request's language
#[derive(Debug, Clone)]
pub struct ResolvedLanguage {
    /// Tag used for the request; the auto sentinel when nothing specific matched
    pub concrete_tag: String,
    pub profile: Arc<LanguageProfile>,
    /// Raw detector code, when the detector was consulted and answered
    pub detector_code: Option<String>,
}

impl ResolvedLanguage {
    pub fn is_unresolved(&self) -> bool {
        self.concrete_tag == AUTO_TAG
    }
}

#[derive(Clone)]
pub struct LanguageResolver {
    registry: Arc<LanguageRegistry>,
    detector: Option<Arc<dyn LanguageDetector>>,
    detect_timeout: Duration,
    observer: Arc<dyn CheckObserver>,
}

impl LanguageResolver {
    pub fn new(registry: Arc<LanguageRegistry>, detector: Option<Arc<dyn LanguageDetector>>) -> Self {
        Self {
            registry,
            detector,
            detect_timeout: DEFAULT_DETECT_TIMEOUT,
            observer: Arc::new(NoOpObserver),
        }
    }

    pub fn with_detect_timeout(mut self, timeout: Duration) -> Self {
        self.detect_timeout = timeout;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn CheckObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_detector(mut self, detector: Option<Arc<dyn LanguageDetector>>) -> Self {
        self.detector = detector;
        self
    }

    /// Resolves `requested` for `text`; never fails
    pub async fn resolve(&self, text: &str, requested: &str) -> ResolvedLanguage {
        if self.registry.is_explicit(requested) {
            let profile = self.registry.lookup(requested);
            debug!(tag = %profile.tag, "Using explicitly requested language");
            return ResolvedLanguage {
                concrete_tag: profile.tag.clone(),
                profile,
                detector_code: None,
            };
        }

        if text.trim().is_empty() {
            return self.unresolved(None);
        }

        let Some(detector) = self.detector.as_ref() else {
            self.observer.on_event(&CheckEvent::DetectionFailed {
                reason: "no detector configured".to_string(),
            });
            return self.unresolved(None);
        };

        let started = Instant::now();
        let code = match self.run_detector(Arc::clone(detector), text).await {
            Ok(code) => code,
            Err(reason) => {
                self.observer.on_event(&CheckEvent::DetectionFailed { reason });
                return self.unresolved(None);
            }
        };

        let mapped = self.registry.profile_for_detector_tag(&code);
        self.observer.on_event(&CheckEvent::DetectionCompleted {
            detected: code.clone(),
            mapped: mapped.as_ref().map(|p| p.tag.clone()),
            elapsed: started.elapsed(),
        });

        match mapped {
            Some(profile) => ResolvedLanguage {
                concrete_tag: profile.tag.clone(),
                profile,
                detector_code: Some(code),
            },
            None => self.unresolved(Some(code)),
        }
    }

    /// Runs the detector on its own task so a panic or a stall stays contained
    async fn run_detector(&self, detector: Arc<dyn LanguageDetector>, text: &str) -> Result<String, String> {
        let text = text.to_string();
        let mut handle = tokio::spawn(async move { detector.detect(&text).await });

        match tokio::time::timeout(self.detect_timeout, &mut handle).await {
            Ok(Ok(Ok(code))) => Ok(code),
            Ok(Ok(Err(e))) => Err(e.to_string()),
            Ok(Err(join_error)) => Err(format!("detector task failed: {}", join_error)),
            Err(_) => {
                handle.abort();
                Err(format!(
                    "detector timed out after {}ms",
                    self.detect_timeout.as_millis()
                ))
            }
        }
    }

    fn unresolved(&self, detector_code: Option<String>) -> ResolvedLanguage {
        ResolvedLanguage {
            concrete_tag: AUTO_TAG.to_string(),
            profile: self.registry.default_profile(),
            detector_code,
        }
    }
}

impl std::fmt::Debug for LanguageResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageResolver")
            .field("languages", &self.registry.len())
            .field("detector", &self.detector.as_ref().map(|d| d.name().to_string()))
            .field("detect_timeout", &self.detect_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::mock::StubBackend;
    use crate::checker::{AdapterSet, BackendKind};
    use crate::detect::mock::StubDetector;
    use std::sync::Mutex;

    fn registry() -> Arc<LanguageRegistry> {
        let adapters = BackendKind::all().iter().fold(AdapterSet::new(), |set, kind| {
            set.with(Arc::new(StubBackend::clean(kind.id())))
        });
        Arc::new(LanguageRegistry::with_defaults(&adapters).unwrap())
    }

    fn resolver(detector: Arc<StubDetector>) -> LanguageResolver {
        LanguageResolver::new(registry(), Some(detector as Arc<dyn LanguageDetector>))
    }

    #[derive(Default)]
    struct RecordingObserver {
        events: Mutex<Vec<CheckEvent>>,
    }

    impl CheckObserver for RecordingObserver {
        fn on_event(&self, event: &CheckEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    #[tokio::test]
    async fn test_explicit_tag_skips_detection() {
        let detector = Arc::new(StubDetector::returning("kor"));
        let resolved = resolver(detector.clone()).resolve("Some English text", "de").await;

        assert_eq!(resolved.concrete_tag, "de");
        assert_eq!(resolved.profile.backend_ids, vec!["rechtschreibung24"]);
        assert_eq!(detector.calls(), 0);
    }

    #[tokio::test]
    async fn test_auto_maps_detector_code() {
        let detector = Arc::new(StubDetector::returning("kor"));
        let resolved = resolver(detector.clone()).resolve("아버지가방에 들어가신다", "auto").await;

        assert_eq!(resolved.concrete_tag, "ko");
        assert_eq!(resolved.detector_code.as_deref(), Some("kor"));
        assert_eq!(detector.calls(), 1);
    }

    #[tokio::test]
    async fn test_unknown_tag_falls_through_to_detection() {
        let detector = Arc::new(StubDetector::returning("eng"));
        let resolved = resolver(detector.clone()).resolve("Hello there", "klingon").await;

        assert_eq!(resolved.concrete_tag, "en");
        assert_eq!(detector.calls(), 1);
    }

    #[tokio::test]
    async fn test_unmapped_code_uses_default() {
        let detector = Arc::new(StubDetector::returning("tlh"));
        let resolved = resolver(detector).resolve("nuqneH", "auto").await;

        assert!(resolved.is_unresolved());
        assert_eq!(resolved.profile.tag, AUTO_TAG);
        assert_eq!(resolved.detector_code.as_deref(), Some("tlh"));
    }

    #[tokio::test]
    async fn test_detector_failure_uses_default() {
        let detector = Arc::new(StubDetector::failing());
        let resolved = resolver(detector).resolve("text", "auto").await;

        assert_eq!(resolved.concrete_tag, AUTO_TAG);
        assert!(resolved.detector_code.is_none());
    }

    #[tokio::test]
    async fn test_detector_timeout_uses_default() {
        let detector = Arc::new(StubDetector::returning("eng").delayed(Duration::from_secs(5)));
        let observer = Arc::new(RecordingObserver::default());
        let resolved = resolver(detector)
            .with_detect_timeout(Duration::from_millis(20))
            .with_observer(observer.clone())
            .resolve("text", "auto")
            .await;

        assert_eq!(resolved.concrete_tag, AUTO_TAG);
        let events = observer.events.lock().unwrap();
        assert!(matches!(
            events.as_slice(),
            [CheckEvent::DetectionFailed { reason }] if reason.contains("timed out")
        ));
    }

    #[tokio::test]
    async fn test_empty_text_never_reaches_detector() {
        let detector = Arc::new(StubDetector::returning("eng"));
        let resolved = resolver(detector.clone()).resolve("   ", "auto").await;

        assert_eq!(resolved.concrete_tag, AUTO_TAG);
        assert_eq!(detector.calls(), 0);
    }

    #[tokio::test]
    async fn test_absent_detector_uses_default() {
        let resolved = LanguageResolver::new(registry(), None).resolve("text", "").await;
        assert_eq!(resolved.concrete_tag, AUTO_TAG);
    }

    #[tokio::test]
    async fn test_detection_event_reports_mapping() {
        let observer = Arc::new(RecordingObserver::default());
        resolver(Arc::new(StubDetector::returning("jpn")))
            .with_observer(observer.clone())
            .resolve("日本語のテキスト", "auto")
            .await;

        let events = observer.events.lock().unwrap();
        assert!(matches!(
            events.as_slice(),
            [CheckEvent::DetectionCompleted { detected, mapped: Some(tag), .. }]
                if detected == "jpn" && tag == "ja"
        ));
    }
}
