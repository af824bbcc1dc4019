//! Configuration management for lingocheck
//!
//! Settings are loaded from environment variables with sensible defaults.
//! Configuration covers the listen address, request limits, timeouts and the
//! endpoint of every built-in checker backend.
//!
//! # Environment Variables
//!
//! - `LINGOCHECK_BIND`: Listen address - default: "127.0.0.1:8787"
//! - `LINGOCHECK_MAX_TEXT_CHARS`: Character ceiling per request - default: "20000"
//! - `LINGOCHECK_ADAPTER_TIMEOUT`: Per-backend timeout in seconds - default: "10"
//! - `LINGOCHECK_REQUEST_DEADLINE`: Whole-request deadline in seconds - default: "25"
//! - `LINGOCHECK_DETECT_TIMEOUT`: Language detection timeout in milliseconds - default: "500"
//! - `LINGOCHECK_LOG_LEVEL`: Logging level - default: "info"
//! - `LINGOCHECK_<BACKEND>_URL`: Endpoint override, e.g. `LINGOCHECK_LANGUAGETOOL_URL`
//!
//! # Example
//!
//! ```no_run
//! use lingocheck::LingoConfig;
//!
//! let config = LingoConfig::default();
//! config.validate().expect("Invalid configuration");
//! println!("{}", config);
//! ```

use std::collections::HashMap;
use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

use crate::checker::BackendKind;

const DEFAULT_BIND: &str = "127.0.0.1:8787";
const DEFAULT_MAX_TEXT_CHARS: usize = 20_000;
const DEFAULT_ADAPTER_TIMEOUT_SECS: u64 = 10;
const DEFAULT_REQUEST_DEADLINE_SECS: u64 = 25;
const DEFAULT_DETECT_TIMEOUT_MS: u64 = 500;
const DEFAULT_LOG_LEVEL: &str = "info";

const MAX_TIMEOUT_SECS: u64 = 300;
const MAX_DETECT_TIMEOUT_MS: u64 = 10_000;
const MAX_TEXT_CHARS_CEILING: usize = 1_000_000;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// Failed to parse configuration value
    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },

    /// Shared HTTP client could not be built
    #[error("Failed to initialize HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Main configuration structure for lingocheck
///
/// `Default::default()` loads from environment variables; [`LingoConfig::baseline`]
/// gives the built-in defaults without looking at the environment.
#[derive(Debug, Clone)]
pub struct LingoConfig {
    /// Address the HTTP server binds to
    pub bind: String,

    /// Maximum accepted text length, in characters
    pub max_text_chars: usize,

    /// Per-adapter timeout in seconds
    pub adapter_timeout_secs: u64,

    /// Overall per-request deadline in seconds
    pub request_deadline_secs: u64,

    /// Language detection timeout in milliseconds
    pub detect_timeout_ms: u64,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Emit logs as JSON lines
    pub log_json: bool,

    /// Endpoint overrides keyed by backend id
    pub endpoints: HashMap<String, String>,
}

impl Default for LingoConfig {
    /// Loads LINGOCHECK_* environment variables, falling back to defaults
    fn default() -> Self {
        let base = Self::baseline();

        let bind = env::var("LINGOCHECK_BIND").unwrap_or(base.bind);

        let max_text_chars = env::var("LINGOCHECK_MAX_TEXT_CHARS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(base.max_text_chars);

        let adapter_timeout_secs = env::var("LINGOCHECK_ADAPTER_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(base.adapter_timeout_secs);

        let request_deadline_secs = env::var("LINGOCHECK_REQUEST_DEADLINE")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(base.request_deadline_secs);

        let detect_timeout_ms = env::var("LINGOCHECK_DETECT_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(base.detect_timeout_ms);

        let log_level = env::var("LINGOCHECK_LOG_LEVEL")
            .unwrap_or(base.log_level)
            .to_lowercase();

        let log_json = env::var("LINGOCHECK_LOG_JSON")
            .ok()
            .and_then(|v| v.trim().to_lowercase().parse::<bool>().ok())
            .unwrap_or(base.log_json);

        let endpoints = BackendKind::all()
            .iter()
            .filter_map(|kind| {
                env::var(kind.endpoint_env_var())
                    .ok()
                    .filter(|url| !url.trim().is_empty())
                    .map(|url| (kind.id().to_string(), url))
            })
            .collect();

        Self {
            bind,
            max_text_chars,
            adapter_timeout_secs,
            request_deadline_secs,
            detect_timeout_ms,
            log_level,
            log_json,
            endpoints,
        }
    }
}

impl LingoConfig {
    /// Built-in defaults, ignoring the environment
    pub fn baseline() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
            adapter_timeout_secs: DEFAULT_ADAPTER_TIMEOUT_SECS,
            request_deadline_secs: DEFAULT_REQUEST_DEADLINE_SECS,
            detect_timeout_ms: DEFAULT_DETECT_TIMEOUT_MS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_json: false,
            endpoints: HashMap::new(),
        }
    }

    /// Validates the configuration
    ///
    /// Checks that:
    /// - Timeouts are non-zero and bounded
    /// - The request deadline leaves room for at least one adapter timeout
    /// - The character ceiling is in range
    /// - Log level and bind address are valid
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any validation fails
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.adapter_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Adapter timeout must be at least 1 second".to_string(),
            ));
        }
        if self.adapter_timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::ValidationFailed(
                "Adapter timeout cannot exceed 5 minutes".to_string(),
            ));
        }

        if self.request_deadline_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::ValidationFailed(
                "Request deadline cannot exceed 5 minutes".to_string(),
            ));
        }
        if self.request_deadline_secs < self.adapter_timeout_secs {
            return Err(ConfigError::ValidationFailed(format!(
                "Request deadline ({}s) must not be shorter than the adapter timeout ({}s)",
                self.request_deadline_secs, self.adapter_timeout_secs
            )));
        }

        if self.detect_timeout_ms == 0 || self.detect_timeout_ms > MAX_DETECT_TIMEOUT_MS {
            return Err(ConfigError::ValidationFailed(format!(
                "Detection timeout must be between 1 and {} ms",
                MAX_DETECT_TIMEOUT_MS
            )));
        }

        if self.max_text_chars == 0 {
            return Err(ConfigError::ValidationFailed(
                "Max text length must be at least 1 character".to_string(),
            ));
        }
        if self.max_text_chars > MAX_TEXT_CHARS_CEILING {
            return Err(ConfigError::ValidationFailed(format!(
                "Max text length cannot exceed {} characters",
                MAX_TEXT_CHARS_CEILING
            )));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        self.bind_addr()?;

        Ok(())
    }

    /// Parsed listen address
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind.parse().map_err(|e: std::net::AddrParseError| ConfigError::ParseError {
            field: "LINGOCHECK_BIND".to_string(),
            error: e.to_string(),
        })
    }

    pub fn adapter_timeout(&self) -> Duration {
        Duration::from_secs(self.adapter_timeout_secs)
    }

    pub fn request_deadline(&self) -> Duration {
        Duration::from_secs(self.request_deadline_secs)
    }

    pub fn detect_timeout(&self) -> Duration {
        Duration::from_millis(self.detect_timeout_ms)
    }

    /// Endpoint for a backend: the override if set, otherwise the built-in URL
    pub fn endpoint(&self, kind: BackendKind) -> String {
        self.endpoints
            .get(kind.id())
            .cloned()
            .unwrap_or_else(|| kind.default_endpoint().to_string())
    }

    /// Points a backend at a different URL
    pub fn with_endpoint(mut self, kind: BackendKind, url: impl Into<String>) -> Self {
        self.endpoints.insert(kind.id().to_string(), url.into());
        self
    }

    /// Converts configuration to a display map for output formatting
    pub fn to_display_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();

        map.insert("bind".to_string(), self.bind.clone());
        map.insert("max_text_chars".to_string(), self.max_text_chars.to_string());
        map.insert(
            "adapter_timeout_secs".to_string(),
            self.adapter_timeout_secs.to_string(),
        );
        map.insert(
            "request_deadline_secs".to_string(),
            self.request_deadline_secs.to_string(),
        );
        map.insert(
            "detect_timeout_ms".to_string(),
            self.detect_timeout_ms.to_string(),
        );
        map.insert("log_level".to_string(), self.log_level.clone());
        map.insert("log_json".to_string(), self.log_json.to_string());
        for kind in BackendKind::all() {
            map.insert(format!("endpoint.{}", kind.id()), self.endpoint(*kind));
        }

        map
    }
}

impl fmt::Display for LingoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Lingocheck Configuration:")?;
        writeln!(f, "  Bind: {}", self.bind)?;
        writeln!(f, "  Max Text Length: {} chars", self.max_text_chars)?;
        writeln!(f, "  Adapter Timeout: {}s", self.adapter_timeout_secs)?;
        writeln!(f, "  Request Deadline: {}s", self.request_deadline_secs)?;
        writeln!(f, "  Detect Timeout: {}ms", self.detect_timeout_ms)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        writeln!(f, "  Log JSON: {}", self.log_json)?;
        for kind in BackendKind::all() {
            writeln!(f, "  Endpoint {}: {}", kind.id(), self.endpoint(*kind))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    /// Helper to temporarily set environment variables for testing
    struct EnvGuard {
        key: String,
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let old_value = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                old_value,
            }
        }

        fn unset(key: &str) -> Self {
            let old_value = env::var(key).ok();
            env::remove_var(key);
            Self {
                key: key.to_string(),
                old_value,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    #[test]
    #[serial]
    fn test_default_configuration() {
        let _guards = vec![
            EnvGuard::unset("LINGOCHECK_BIND"),
            EnvGuard::unset("LINGOCHECK_MAX_TEXT_CHARS"),
            EnvGuard::unset("LINGOCHECK_ADAPTER_TIMEOUT"),
            EnvGuard::unset("LINGOCHECK_REQUEST_DEADLINE"),
            EnvGuard::unset("LINGOCHECK_DETECT_TIMEOUT"),
            EnvGuard::set("LINGOCHECK_LOG_LEVEL", DEFAULT_LOG_LEVEL),
            EnvGuard::unset("LINGOCHECK_LOG_JSON"),
            EnvGuard::unset("LINGOCHECK_LANGUAGETOOL_URL"),
        ];

        let config = LingoConfig::default();

        assert_eq!(config.bind, DEFAULT_BIND);
        assert_eq!(config.max_text_chars, DEFAULT_MAX_TEXT_CHARS);
        assert_eq!(config.adapter_timeout_secs, DEFAULT_ADAPTER_TIMEOUT_SECS);
        assert_eq!(config.request_deadline_secs, DEFAULT_REQUEST_DEADLINE_SECS);
        assert_eq!(config.detect_timeout_ms, DEFAULT_DETECT_TIMEOUT_MS);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert!(!config.log_json);
        assert_eq!(
            config.endpoint(BackendKind::LanguageTool),
            BackendKind::LanguageTool.default_endpoint()
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_environment_variable_parsing() {
        let _guards = vec![
            EnvGuard::set("LINGOCHECK_BIND", "0.0.0.0:9000"),
            EnvGuard::set("LINGOCHECK_MAX_TEXT_CHARS", "5000"),
            EnvGuard::set("LINGOCHECK_ADAPTER_TIMEOUT", "3"),
            EnvGuard::set("LINGOCHECK_REQUEST_DEADLINE", "8"),
            EnvGuard::set("LINGOCHECK_DETECT_TIMEOUT", "250"),
            EnvGuard::set("LINGOCHECK_LOG_LEVEL", "DEBUG"),
            EnvGuard::set("LINGOCHECK_LOG_JSON", "TRUE"),
            EnvGuard::set("LINGOCHECK_LANGUAGETOOL_URL", "http://localhost:8010/v2/check"),
        ];

        let config = LingoConfig::default();

        assert_eq!(config.bind, "0.0.0.0:9000");
        assert_eq!(config.max_text_chars, 5000);
        assert_eq!(config.adapter_timeout(), Duration::from_secs(3));
        assert_eq!(config.request_deadline(), Duration::from_secs(8));
        assert_eq!(config.detect_timeout(), Duration::from_millis(250));
        assert_eq!(config.log_level, "debug");
        assert!(config.log_json);
        assert_eq!(
            config.endpoint(BackendKind::LanguageTool),
            "http://localhost:8010/v2/check"
        );
        assert_eq!(
            config.endpoint(BackendKind::Pusan),
            BackendKind::Pusan.default_endpoint()
        );
    }

    #[test]
    #[serial]
    fn test_unparsable_values_fall_back() {
        let _guards = vec![
            EnvGuard::set("LINGOCHECK_MAX_TEXT_CHARS", "lots"),
            EnvGuard::set("LINGOCHECK_ADAPTER_TIMEOUT", "-1"),
        ];

        let config = LingoConfig::default();
        assert_eq!(config.max_text_chars, DEFAULT_MAX_TEXT_CHARS);
        assert_eq!(config.adapter_timeout_secs, DEFAULT_ADAPTER_TIMEOUT_SECS);
    }

    #[test]
    fn test_validation_invalid_timeout() {
        let mut config = LingoConfig::baseline();
        config.adapter_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = LingoConfig::baseline();
        config.adapter_timeout_secs = 301;
        config.request_deadline_secs = 301;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_deadline_shorter_than_adapter_timeout() {
        let mut config = LingoConfig::baseline();
        config.adapter_timeout_secs = 10;
        config.request_deadline_secs = 5;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("deadline"));
    }

    #[test]
    fn test_validation_text_ceiling() {
        let mut config = LingoConfig::baseline();
        config.max_text_chars = 0;
        assert!(config.validate().is_err());

        config.max_text_chars = MAX_TEXT_CHARS_CEILING + 1;
        assert!(config.validate().is_err());

        config.max_text_chars = MAX_TEXT_CHARS_CEILING;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_invalid_log_level() {
        let mut config = LingoConfig::baseline();
        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_bind() {
        let mut config = LingoConfig::baseline();
        config.bind = "localhost".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_with_endpoint() {
        let config = LingoConfig::baseline().with_endpoint(BackendKind::Daum, "http://127.0.0.1:1/d");
        assert_eq!(config.endpoint(BackendKind::Daum), "http://127.0.0.1:1/d");
        assert_eq!(
            config.to_display_map().get("endpoint.daum").map(String::as_str),
            Some("http://127.0.0.1:1/d")
        );
    }

    #[test]
    fn test_config_display() {
        let display = format!("{}", LingoConfig::baseline());
        assert!(display.contains("Lingocheck Configuration:"));
        assert!(display.contains("Endpoint languagetool:"));
    }
}
