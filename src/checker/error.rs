//! Adapter failure signal
//!
//! Every transport, status, parse or timeout problem inside an adapter collapses
//! to [`Unavailable`]. The aggregator never propagates it; the backend is simply
//! absent from the merge for that request.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Unavailable {
    /// Connection or transport failure
    #[error("network error: {0}")]
    Network(String),

    /// The adapter did not answer within its own timeout
    #[error("timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// Non-success HTTP status
    #[error("backend returned HTTP {status}")]
    Status { status: u16 },

    /// The body could not be decoded into the expected shape
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The request-wide deadline fired before this adapter finished
    #[error("request deadline exceeded")]
    DeadlineExceeded,

    /// The adapter task panicked
    #[error("adapter task failed: {0}")]
    Panicked(String),

    /// No adapter is registered under the requested backend id
    #[error("no adapter registered for backend '{0}'")]
    NotRegistered(String),
}

impl Unavailable {
    /// Short machine-friendly label for structured events
    pub fn label(&self) -> &'static str {
        match self {
            Unavailable::Network(_) => "network",
            Unavailable::Timeout(_) => "timeout",
            Unavailable::Status { .. } => "status",
            Unavailable::Malformed(_) => "malformed",
            Unavailable::DeadlineExceeded => "deadline",
            Unavailable::Panicked(_) => "panicked",
            Unavailable::NotRegistered(_) => "not_registered",
        }
    }
}
