//! Checker backend adapters
//!
//! One adapter per external grammar or spelling service, all behind the
//! [`CheckerBackend`] trait. Structured adapters map typed JSON payloads,
//! markup adapters scrape HTML on a best-effort basis.

pub mod backend;
pub mod daum;
pub mod error;
pub mod finding;
pub mod http;
pub mod json_api;
pub mod kind;
pub mod languagetool;
pub mod lenient;
pub mod markup;
pub mod matches;
pub mod mock;
pub mod pusan;
pub mod set;

pub use backend::{CheckerBackend, ResponseKind};
pub use error::Unavailable;
pub use finding::{span_text, Category, Finding, NormalizedPayload, RawFinding};
pub use kind::BackendKind;
pub use set::AdapterSet;
