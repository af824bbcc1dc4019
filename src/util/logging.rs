//! Structured logging setup for lingocheck
//!
//! Console output by default, JSON when `LINGOCHECK_LOG_JSON=true`.
//! `RUST_LOG` directives are honoured on top of the configured level.
//!
//! # Example
//!
//! ```no_run
//! use lingocheck::util::logging;
//!
//! logging::init_from_env();
//!
//! tracing::info!(bind = "127.0.0.1:8787", "Server starting");
//! ```

use std::env;
use std::sync::Once;

use crate::config::LingoConfig;
use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Ensures logging is only initialized once
static INIT: Once = Once::new();

/// HTTP stack crates clamped to `warn` unless `RUST_LOG` says otherwise
const NOISY_TARGETS: &[&str] = &["h2", "hyper", "hyper_util", "reqwest", "tower_http", "html5ever", "selectors"];

/// Configuration for logging initialization
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level for lingocheck's own events
    pub level: Level,

    /// Use JSON output format
    pub use_json: bool,

    /// Include the module target (e.g., lingocheck::aggregate) in logs
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,

    /// Include thread ID and name in logs
    pub include_thread_ids: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
            include_thread_ids: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Level and output format taken from the service configuration
    ///
    /// `LingoConfig::log_level` is the only place the level is read from.
    pub fn from_config(config: &LingoConfig) -> Self {
        let level = parse_level(&config.log_level);
        if config.log_json {
            Self {
                level,
                ..Self::production()
            }
        } else {
            Self::with_level(level)
        }
    }

    /// JSON output with full metadata, for running behind a log collector
    pub fn production() -> Self {
        Self {
            level: Level::INFO,
            use_json: true,
            include_target: true,
            include_location: true,
            include_thread_ids: true,
        }
    }

    fn filter(&self) -> EnvFilter {
        let mut filter = EnvFilter::from_default_env().add_directive(own_directive(self.level));

        if env::var("RUST_LOG").is_err() {
            for target in NOISY_TARGETS {
                if let Ok(directive) = format!("{}=warn", target).parse::<Directive>() {
                    filter = filter.add_directive(directive);
                }
            }
        }

        filter
    }
}

fn own_directive(level: Level) -> Directive {
    format!("lingocheck={}", level)
        .parse()
        .unwrap_or_else(|_| Directive::from(level))
}

/// Parses a log level from a string
///
/// Unknown values fall back to `Level::INFO`.
///
/// ```
/// use lingocheck::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("debug"), Level::DEBUG);
/// assert_eq!(parse_level("WARN"), Level::WARN);
/// assert_eq!(parse_level("loud"), Level::INFO);
/// ```
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

/// Initializes the global subscriber; later calls are ignored
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config.filter();

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_thread_ids(config.include_thread_ids)
                        .with_thread_names(config.include_thread_ids),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_thread_ids(config.include_thread_ids)
                        .with_thread_names(config.include_thread_ids),
                )
                .init();
        }
    });
}

/// Initializes logging from `LINGOCHECK_*` settings
pub fn init_from_env() {
    init_logging(LoggingConfig::from_config(&LingoConfig::default()));
}
