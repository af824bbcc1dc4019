//! Checker backend abstraction
//!
//! Each external grammar or spelling service is wrapped by one adapter that
//! implements [`CheckerBackend`]. Adapters are independent of each other and of
//! the aggregator, so they can be swapped for stubs in tests.

use async_trait::async_trait;

use super::error::Unavailable;
use super::finding::NormalizedPayload;

/// How an adapter obtains its findings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// Typed JSON payload mapped field by field
    Structured,
    /// Semi-structured text or HTML scraped heuristically
    Markup,
}

/// Core trait that every checker adapter implements
///
/// # Contract
///
/// - Never panics or returns a fault other than [`Unavailable`].
/// - Blank input yields an empty payload, not `Unavailable`.
/// - Markup adapters may legitimately return zero findings when no structure
///   could be recognised.
///
/// # Example
///
/// ```ignore
/// use lingocheck::checker::CheckerBackend;
///
/// async fn run(backend: &dyn CheckerBackend) {
///     match backend.check("Their is a problem", "en").await {
///         Ok(payload) => println!("{} findings", payload.findings.len()),
///         Err(reason) => println!("{} unavailable: {}", backend.id(), reason),
///     }
/// }
/// ```
#[async_trait]
pub trait CheckerBackend: Send + Sync {
    /// Stable identifier referenced by language profiles
    fn id(&self) -> &str;

    fn kind(&self) -> ResponseKind {
        ResponseKind::Structured
    }

    /// Checks `text`; `language` is the resolved profile tag, passed as context
    async fn check(&self, text: &str, language: &str) -> Result<NormalizedPayload, Unavailable>;
}

/// Returns the early-exit payload for blank input, if applicable
pub(crate) fn blank_input(id: &str, text: &str) -> Option<NormalizedPayload> {
    if text.trim().is_empty() {
        Some(NormalizedPayload::empty(id))
    } else {
        None
    }
}
