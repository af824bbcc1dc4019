//! The check entry point shared by the HTTP server and the CLI

use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::aggregate::{AggregateReport, Aggregator};
use crate::checker::AdapterSet;
use crate::config::{ConfigError, LingoConfig};
use crate::detect::{LanguageDetector, WhatlangDetector};
use crate::observe::{CheckObserver, LoggingObserver};
use crate::registry::{is_auto, LanguageRegistry, RegistryError, AUTO_TAG};
use crate::resolver::LanguageResolver;

/// Request-level failures, reported to the caller
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckError {
    #[error("Text must not be empty")]
    EmptyText,

    #[error("Text is too long: {actual} characters (limit {limit})")]
    TextTooLong { limit: usize, actual: usize },

    /// Unexpected fault while handling the request
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CheckError {
    /// True for problems with the request itself rather than the service
    pub fn is_client_error(&self) -> bool {
        !matches!(self, CheckError::Internal(_))
    }
}

/// Startup failures while wiring the service from configuration
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Owns the registry, resolver and aggregator for the lifetime of the process
///
/// Cheap to clone; every clone shares the same read-only registry and adapters.
#[derive(Debug, Clone)]
pub struct CheckService {
    registry: Arc<LanguageRegistry>,
    resolver: LanguageResolver,
    aggregator: Aggregator,
    max_text_chars: usize,
    request_deadline: Duration,
}

impl CheckService {
    /// Service with built-in defaults, the whatlang detector and no logging observer
    pub fn new(registry: Arc<LanguageRegistry>, adapters: AdapterSet) -> Self {
        let defaults = LingoConfig::baseline();
        let detector: Arc<dyn LanguageDetector> = Arc::new(WhatlangDetector::new());

        Self {
            resolver: LanguageResolver::new(Arc::clone(&registry), Some(detector))
                .with_detect_timeout(defaults.detect_timeout()),
            aggregator: Aggregator::new(adapters)
                .with_adapter_timeout(defaults.adapter_timeout())
                .with_request_deadline(defaults.request_deadline()),
            registry,
            max_text_chars: defaults.max_text_chars,
            request_deadline: defaults.request_deadline(),
        }
    }

    /// Builds the built-in adapters and language table from `config`
    ///
    /// A language that references an unknown backend aborts startup here.
    pub fn from_config(config: &LingoConfig) -> Result<Self, SetupError> {
        config.validate()?;
        let adapters = AdapterSet::builtin(config)?;
        let registry = Arc::new(LanguageRegistry::with_defaults(&adapters)?);

        info!(
            languages = registry.len(),
            adapters = adapters.len(),
            "Check service ready"
        );

        Ok(Self::new(registry, adapters)
            .with_limits(config)
            .with_observer(Arc::new(LoggingObserver)))
    }

    /// Applies character ceiling and timeouts from `config`
    pub fn with_limits(mut self, config: &LingoConfig) -> Self {
        self.max_text_chars = config.max_text_chars;
        self.request_deadline = config.request_deadline();
        self.resolver = self.resolver.with_detect_timeout(config.detect_timeout());
        self.aggregator = self
            .aggregator
            .with_adapter_timeout(config.adapter_timeout())
            .with_request_deadline(config.request_deadline());
        self
    }

    pub fn with_detector(mut self, detector: Option<Arc<dyn LanguageDetector>>) -> Self {
        self.resolver = self.resolver.with_detector(detector);
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn CheckObserver>) -> Self {
        self.resolver = self.resolver.with_observer(Arc::clone(&observer));
        self.aggregator = self.aggregator.with_observer(observer);
        self
    }

    pub fn with_max_text_chars(mut self, limit: usize) -> Self {
        self.max_text_chars = limit;
        self
    }

    pub fn with_request_deadline(mut self, deadline: Duration) -> Self {
        self.request_deadline = deadline;
        self
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    pub fn max_text_chars(&self) -> usize {
        self.max_text_chars
    }

    /// Rejects empty or oversized text before any detector or adapter runs
    pub fn validate_text(&self, text: &str) -> Result<(), CheckError> {
        if text.trim().is_empty() {
            return Err(CheckError::EmptyText);
        }
        let actual = text.chars().count();
        if actual > self.max_text_chars {
            return Err(CheckError::TextTooLong {
                limit: self.max_text_chars,
                actual,
            });
        }
        Ok(())
    }

    /// Resolves the language, fans out to its backends and merges the results
    ///
    /// An empty `requested_language` means auto-detection. The work runs on a
    /// separate task: a fault inside it becomes [`CheckError::Internal`] and
    /// leaves concurrent requests untouched.
    pub async fn handle_check(
        &self,
        text: &str,
        requested_language: &str,
    ) -> Result<AggregateReport, CheckError> {
        self.validate_text(text)?;

        let requested = if is_auto(requested_language) {
            AUTO_TAG.to_string()
        } else {
            requested_language.trim().to_lowercase()
        };
        let request_id = Uuid::new_v4();
        let span = info_span!("check", request_id = %request_id, requested = %requested);

        let service = self.clone();
        let text = text.to_string();
        let task = tokio::spawn(
            async move {
                let deadline = Instant::now() + service.request_deadline;
                let resolved = service.resolver.resolve(&text, &requested).await;
                service
                    .aggregator
                    .aggregate_until(&text, &resolved, deadline)
                    .await
                    .with_request(requested, request_id)
            }
            .instrument(span),
        );

        task.await
            .map_err(|e| CheckError::Internal(format!("check task failed: {}", e)))
    }
}
