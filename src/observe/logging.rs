//! Logging-based check observer

use super::{AdapterOutcome, CheckEvent, CheckObserver};
use tracing::{debug, info, warn};

/// Observer that turns check events into tracing records
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingObserver;

impl CheckObserver for LoggingObserver {
    fn on_event(&self, event: &CheckEvent) {
        match event {
            CheckEvent::DetectionCompleted {
                detected,
                mapped,
                elapsed,
            } => {
                debug!(
                    detected = %detected,
                    mapped = mapped.as_deref().unwrap_or("-"),
                    elapsed_ms = elapsed.as_millis(),
                    "Language detected"
                );
            }
            CheckEvent::DetectionFailed { reason } => {
                debug!(reason = %reason, "Language detection failed, using default profile");
            }
            CheckEvent::AdapterStarted { adapter } => {
                debug!(adapter = %adapter, "Invoking adapter");
            }
            CheckEvent::AdapterFinished {
                adapter,
                outcome,
                latency,
            } => match outcome {
                AdapterOutcome::Ok { findings } => {
                    info!(
                        adapter = %adapter,
                        outcome = outcome.label(),
                        findings,
                        latency_ms = latency.as_millis(),
                        "Adapter finished"
                    );
                }
                AdapterOutcome::Unavailable { reason } => {
                    warn!(
                        adapter = %adapter,
                        outcome = outcome.label(),
                        reason = %reason,
                        latency_ms = latency.as_millis(),
                        "Adapter unavailable"
                    );
                }
            },
            CheckEvent::AggregationCompleted {
                findings,
                duplicates_removed,
                consulted,
                attempted,
                elapsed,
            } => {
                info!(
                    findings,
                    duplicates_removed,
                    consulted,
                    attempted,
                    elapsed_ms = elapsed.as_millis(),
                    "Check complete"
                );
            }
        }
    }
}
