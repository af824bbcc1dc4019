//! Check events and the observer trait

use std::time::Duration;

use crate::checker::Unavailable;

/// How one adapter invocation ended
#[derive(Debug, Clone, PartialEq)]
pub enum AdapterOutcome {
    Ok { findings: usize },
    Unavailable { reason: Unavailable },
}

impl AdapterOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, AdapterOutcome::Ok { .. })
    }

    /// Short label for structured logs
    pub fn label(&self) -> &'static str {
        match self {
            AdapterOutcome::Ok { .. } => "ok",
            AdapterOutcome::Unavailable { reason } => reason.label(),
        }
    }
}

/// Events emitted while handling one check request
#[derive(Debug, Clone)]
pub enum CheckEvent {
    /// The detector answered; `mapped` is the profile tag it resolved to, if any
    DetectionCompleted {
        detected: String,
        mapped: Option<String>,
        elapsed: Duration,
    },

    /// The detector failed or timed out
    DetectionFailed { reason: String },

    AdapterStarted { adapter: String },

    AdapterFinished {
        adapter: String,
        outcome: AdapterOutcome,
        latency: Duration,
    },

    AggregationCompleted {
        findings: usize,
        duplicates_removed: usize,
        consulted: usize,
        attempted: usize,
        elapsed: Duration,
    },
}

/// Receives check events; injected into the resolver and the aggregator
pub trait CheckObserver: Send + Sync {
    fn on_event(&self, event: &CheckEvent);
}

/// Observer that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpObserver;

impl CheckObserver for NoOpObserver {
    fn on_event(&self, _event: &CheckEvent) {}
}
