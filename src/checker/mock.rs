//! Scriptable stub adapter for tests and offline runs

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use super::backend::CheckerBackend;
use super::error::Unavailable;
use super::finding::{NormalizedPayload, RawFinding};

#[derive(Debug, Clone)]
enum StubBehavior {
    Findings(Vec<RawFinding>),
    Fail(Unavailable),
    Panic,
}

/// Adapter that returns canned findings, fails, sleeps or panics on demand
pub struct StubBackend {
    id: String,
    behavior: StubBehavior,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_language: Mutex<Option<String>>,
}

impl StubBackend {
    pub fn with_findings(id: impl Into<String>, findings: Vec<RawFinding>) -> Self {
        Self::build(id, StubBehavior::Findings(findings))
    }

    pub fn clean(id: impl Into<String>) -> Self {
        Self::with_findings(id, Vec::new())
    }

    /// Always answers with a network failure
    pub fn unavailable(id: impl Into<String>) -> Self {
        Self::failing(id, Unavailable::Network("stub backend offline".to_string()))
    }

    pub fn failing(id: impl Into<String>, reason: Unavailable) -> Self {
        Self::build(id, StubBehavior::Fail(reason))
    }

    pub fn panicking(id: impl Into<String>) -> Self {
        Self::build(id, StubBehavior::Panic)
    }

    /// Sleeps before answering
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_language(&self) -> Option<String> {
        self.last_language.lock().ok().and_then(|l| l.clone())
    }

    fn build(id: impl Into<String>, behavior: StubBehavior) -> Self {
        Self {
            id: id.into(),
            behavior,
            delay: None,
            calls: AtomicUsize::new(0),
            last_language: Mutex::new(None),
        }
    }
}

#[async_trait]
impl CheckerBackend for StubBackend {
    fn id(&self) -> &str {
        &self.id
    }

    async fn check(&self, _text: &str, language: &str) -> Result<NormalizedPayload, Unavailable> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_language.lock() {
            *last = Some(language.to_string());
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.behavior {
            StubBehavior::Findings(findings) => {
                Ok(NormalizedPayload::new(self.id.clone(), findings.clone()))
            }
            StubBehavior::Fail(reason) => Err(reason.clone()),
            StubBehavior::Panic => panic!("stub backend '{}' panicked", self.id),
        }
    }
}

impl std::fmt::Debug for StubBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StubBackend")
            .field("id", &self.id)
            .field("calls", &self.calls())
            .finish()
    }
}
