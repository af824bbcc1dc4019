//! Language detection
//!
//! The resolver only needs an opaque detector code per text; codes are
//! matched against the registry's detector tags and nothing else.

pub mod mock;
mod whatlang;

pub use self::whatlang::WhatlangDetector;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DetectError {
    /// No language could be guessed
    #[error("Language could not be determined")]
    Unknown,

    #[error("Language detector failed: {0}")]
    Failed(String),
}

#[async_trait]
pub trait LanguageDetector: Send + Sync {
    /// Name for logs
    fn name(&self) -> &str;

    /// Best-guess detector code for `text`
    async fn detect(&self, text: &str) -> Result<String, DetectError>;
}
