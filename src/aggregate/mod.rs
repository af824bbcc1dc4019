//! Fan-out to the profile's adapters and merge of their findings
//!
//! Every adapter runs on its own task with its own timeout. Results are
//! collected by registry position, not completion order, so provenance after
//! deduplication does not depend on network timing.

mod dedup;
mod report;

pub use dedup::dedup_findings;
pub use report::AggregateReport;

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::checker::{AdapterSet, Finding, NormalizedPayload, Unavailable};
use crate::observe::{AdapterOutcome, CheckEvent, CheckObserver, NoOpObserver};
use crate::resolver::ResolvedLanguage;

const DEFAULT_ADAPTER_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_REQUEST_DEADLINE: Duration = Duration::from_secs(25);

type AdapterResult = (Result<NormalizedPayload, Unavailable>, Duration);

enum Slot {
    Running {
        id: String,
        started: Instant,
        handle: JoinHandle<AdapterResult>,
    },
    Missing {
        id: String,
    },
}

#[derive(Clone)]
pub struct Aggregator {
    adapters: AdapterSet,
    adapter_timeout: Duration,
    request_deadline: Duration,
    observer: Arc<dyn CheckObserver>,
}

impl Aggregator {
    pub fn new(adapters: AdapterSet) -> Self {
        Self {
            adapters,
            adapter_timeout: DEFAULT_ADAPTER_TIMEOUT,
            request_deadline: DEFAULT_REQUEST_DEADLINE,
            observer: Arc::new(NoOpObserver),
        }
    }

    pub fn with_adapter_timeout(mut self, timeout: Duration) -> Self {
        self.adapter_timeout = timeout;
        self
    }

    pub fn with_request_deadline(mut self, deadline: Duration) -> Self {
        self.request_deadline = deadline;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn CheckObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn adapters(&self) -> &AdapterSet {
        &self.adapters
    }

    /// Checks `text` against every backend of the resolved profile
    pub async fn aggregate(&self, text: &str, resolved: &ResolvedLanguage) -> AggregateReport {
        self.aggregate_until(text, resolved, Instant::now() + self.request_deadline)
            .await
    }

    /// Like [`Aggregator::aggregate`], with an explicit request-wide deadline
    ///
    /// Adapters still running at `deadline` are aborted and reported as
    /// [`Unavailable::DeadlineExceeded`].
    pub async fn aggregate_until(
        &self,
        text: &str,
        resolved: &ResolvedLanguage,
        deadline: Instant,
    ) -> AggregateReport {
        let started = Instant::now();
        let shared_text: Arc<str> = Arc::from(text);

        let slots: Vec<Slot> = resolved
            .profile
            .backend_ids
            .iter()
            .map(|id| self.spawn_adapter(id, &shared_text, &resolved.concrete_tag))
            .collect();
        let attempted = slots.len();

        let mut interim: Vec<Finding> = Vec::new();
        let mut consulted = Vec::new();

        for slot in slots {
            let (id, result, latency) = self.settle(slot, deadline).await;

            let outcome = match result {
                Ok(payload) => {
                    let count = payload.findings.len();
                    interim.extend(
                        payload
                            .findings
                            .into_iter()
                            .map(|raw| raw.fill_original_from(text).into_finding(&id)),
                    );
                    consulted.push(id.clone());
                    AdapterOutcome::Ok { findings: count }
                }
                Err(reason) => AdapterOutcome::Unavailable { reason },
            };

            self.observer.on_event(&CheckEvent::AdapterFinished {
                adapter: id,
                outcome,
                latency,
            });
        }

        let (findings, duplicates_removed) = dedup_findings(interim);

        self.observer.on_event(&CheckEvent::AggregationCompleted {
            findings: findings.len(),
            duplicates_removed,
            consulted: consulted.len(),
            attempted,
            elapsed: started.elapsed(),
        });

        let mut report = AggregateReport::new(Arc::clone(&resolved.profile), resolved.concrete_tag.clone());
        report.findings = findings;
        report.sources_consulted = consulted;
        report.sources_attempted = attempted;
        report.duplicates_removed = duplicates_removed;
        report
    }

    fn spawn_adapter(&self, id: &str, text: &Arc<str>, language: &str) -> Slot {
        self.observer.on_event(&CheckEvent::AdapterStarted {
            adapter: id.to_string(),
        });

        let Some(adapter) = self.adapters.get(id) else {
            return Slot::Missing { id: id.to_string() };
        };

        let text = Arc::clone(text);
        let language = language.to_string();
        let timeout = self.adapter_timeout;

        let handle = tokio::spawn(async move {
            let started = Instant::now();
            let result = match tokio::time::timeout(timeout, adapter.check(&text, &language)).await {
                Ok(result) => result,
                Err(_) => Err(Unavailable::Timeout(timeout)),
            };
            (result, started.elapsed())
        });

        Slot::Running {
            id: id.to_string(),
            started: Instant::now(),
            handle,
        }
    }

    async fn settle(
        &self,
        slot: Slot,
        deadline: Instant,
    ) -> (String, Result<NormalizedPayload, Unavailable>, Duration) {
        match slot {
            Slot::Missing { id } => {
                let reason = Unavailable::NotRegistered(id.clone());
                (id, Err(reason), Duration::ZERO)
            }
            Slot::Running {
                id,
                started,
                mut handle,
            } => {
                let deadline = tokio::time::Instant::from_std(deadline);
                match tokio::time::timeout_at(deadline, &mut handle).await {
                    Ok(Ok((result, latency))) => (id, result, latency),
                    Ok(Err(join_error)) => {
                        let reason = if join_error.is_panic() {
                            Unavailable::Panicked(format!("adapter '{}' panicked", id))
                        } else {
                            Unavailable::Panicked(join_error.to_string())
                        };
                        (id, Err(reason), started.elapsed())
                    }
                    Err(_) => {
                        handle.abort();
                        debug!(adapter = %id, "Adapter still pending at request deadline");
                        (id, Err(Unavailable::DeadlineExceeded), started.elapsed())
                    }
                }
            }
        }
    }
}

impl std::fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregator")
            .field("adapters", &self.adapters)
            .field("adapter_timeout", &self.adapter_timeout)
            .field("request_deadline", &self.request_deadline)
            .finish()
    }
}
