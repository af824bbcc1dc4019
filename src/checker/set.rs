//! The set of adapters available to the aggregator, keyed by backend id

use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::backend::CheckerBackend;
use super::daum::DaumBackend;
use super::http::HttpTransport;
use super::json_api::JsonApiBackend;
use super::kind::BackendKind;
use super::languagetool::{GrammarBotBackend, LanguageToolBackend};
use super::pusan::PusanBackend;
use crate::config::{ConfigError, LingoConfig};

#[derive(Clone, Default)]
pub struct AdapterSet {
    adapters: HashMap<String, Arc<dyn CheckerBackend>>,
    order: Vec<String>,
}

impl AdapterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds every built-in adapter against the configured endpoints
    ///
    /// All adapters share one pooled HTTP client.
    pub fn builtin(config: &LingoConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .user_agent(concat!("lingocheck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ConfigError::HttpClient)?;
        let timeout = config.adapter_timeout();

        let mut set = Self::new();
        for kind in BackendKind::all() {
            let transport = HttpTransport::new(client.clone(), config.endpoint(*kind), timeout);
            debug!(backend = %kind, url = transport.url(), "Registering built-in adapter");

            let adapter: Arc<dyn CheckerBackend> = match kind {
                BackendKind::Pusan => Arc::new(PusanBackend::new(transport)),
                BackendKind::Daum => Arc::new(DaumBackend::new(transport)),
                BackendKind::Enno => Arc::new(JsonApiBackend::enno(transport)),
                BackendKind::Manfen => Arc::new(JsonApiBackend::manfen(transport)),
                BackendKind::Rechtschreibung24 => {
                    Arc::new(JsonApiBackend::rechtschreibung24(transport))
                }
                BackendKind::Prcy => Arc::new(JsonApiBackend::prcy(transport)),
                BackendKind::GrammarBot => Arc::new(GrammarBotBackend::new(transport)),
                BackendKind::LanguageTool => Arc::new(LanguageToolBackend::new(transport)),
            };
            set.register(adapter);
        }

        Ok(set)
    }

    /// Adds an adapter, replacing any previous one with the same id
    pub fn register(&mut self, adapter: Arc<dyn CheckerBackend>) {
        let id = adapter.id().to_string();
        if self.adapters.insert(id.clone(), adapter).is_none() {
            self.order.push(id);
        }
    }

    pub fn with(mut self, adapter: Arc<dyn CheckerBackend>) -> Self {
        self.register(adapter);
        self
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn CheckerBackend>> {
        self.adapters.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.adapters.contains_key(id)
    }

    /// Registered ids in registration order
    pub fn ids(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

impl std::fmt::Debug for AdapterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterSet").field("ids", &self.order).finish()
    }
}
