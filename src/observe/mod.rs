//! Structured observability for check requests

mod event;
mod logging;

pub use event::{AdapterOutcome, CheckEvent, CheckObserver, NoOpObserver};
pub use logging::LoggingObserver;
