//! lingocheck - multi-source grammar and spelling checker
//!
//! A check request carries a text and an optional language tag. The text is
//! routed to the grammar services registered for that language; when no tag is
//! given the language is detected first. Every service is queried concurrently
//! under its own timeout, and their findings are merged into one report with
//! cross-source duplicates removed.
//!
//! # Core Concepts
//!
//! - **Checker backends**: adapters that each speak one external service's
//!   wire format and normalize its answer into findings
//! - **Language registry**: the static table from language tag to display
//!   name, accuracy label and ordered backend list
//! - **Resolver**: turns `auto` into a concrete tag via the language detector
//! - **Aggregator**: fans out, tolerates partial failure and deduplicates
//!
//! # Example Usage
//!
//! ```no_run
//! use lingocheck::{CheckService, LingoConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let service = CheckService::from_config(&LingoConfig::default())?;
//! let report = service.handle_check("She go to school every day.", "auto").await?;
//!
//! for finding in &report.findings {
//!     println!("{} at {}: {}", finding.source_id, finding.offset, finding.message);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`checker`]: backend adapters and the shared finding model
//! - [`registry`]: language profiles
//! - [`detect`]: language identification
//! - [`resolver`]: requested tag to concrete profile
//! - [`aggregate`]: concurrent fan-out and merge
//! - [`service`]: the check entry point
//! - [`server`]: HTTP transport and the browser page
//! - [`observe`]: structured check events
//! - [`config`]: environment-driven configuration
//! - [`cli`]: command-line interface

pub mod aggregate;
pub mod checker;
pub mod cli;
pub mod config;
pub mod detect;
pub mod observe;
pub mod registry;
pub mod resolver;
pub mod server;
pub mod service;
pub mod util;

pub use aggregate::{AggregateReport, Aggregator};
pub use checker::{
    AdapterSet, BackendKind, Category, CheckerBackend, Finding, RawFinding, Unavailable,
};
pub use config::{ConfigError, LingoConfig};
pub use detect::{DetectError, LanguageDetector, WhatlangDetector};
pub use observe::{CheckEvent, CheckObserver, LoggingObserver, NoOpObserver};
pub use registry::{DetectorCollision, LanguageProfile, LanguageRegistry, RegistryError, AUTO_TAG};
pub use resolver::{LanguageResolver, ResolvedLanguage};
pub use service::{CheckError, CheckService, SetupError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
