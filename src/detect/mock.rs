//! Call-counting stub detector

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{DetectError, LanguageDetector};

#[derive(Debug, Clone)]
enum Answer {
    Code(String),
    Fail(DetectError),
}

pub struct StubDetector {
    answer: Answer,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl StubDetector {
    /// Always answers with `code`
    pub fn returning(code: impl Into<String>) -> Self {
        Self::build(Answer::Code(code.into()))
    }

    pub fn failing() -> Self {
        Self::build(Answer::Fail(DetectError::Failed("stub detector failure".to_string())))
    }

    pub fn unknown() -> Self {
        Self::build(Answer::Fail(DetectError::Unknown))
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn build(answer: Answer) -> Self {
        Self {
            answer,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl LanguageDetector for StubDetector {
    fn name(&self) -> &str {
        "stub"
    }

    async fn detect(&self, _text: &str) -> Result<String, DetectError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.answer {
            Answer::Code(code) => Ok(code.clone()),
            Answer::Fail(e) => Err(e.clone()),
        }
    }
}

impl std::fmt::Debug for StubDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StubDetector")
            .field("answer", &self.answer)
            .field("calls", &self.calls())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_counts_calls() {
        let detector = StubDetector::returning("eng");
        assert_eq!(detector.detect("a").await.unwrap(), "eng");
        assert_eq!(detector.detect("b").await.unwrap(), "eng");
        assert_eq!(detector.calls(), 2);
    }

    #[tokio::test]
    async fn test_failing() {
        let detector = StubDetector::failing();
        assert!(matches!(detector.detect("a").await, Err(DetectError::Failed(_))));
        assert_eq!(detector.calls(), 1);
    }
}
