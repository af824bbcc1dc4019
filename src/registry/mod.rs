//! Language registry
//!
//! Maps language tags to their ordered backend lists. The registry is
//! validated against the adapter set when it is built and is read-only
//! afterwards, so it can be shared freely behind an `Arc`.

mod builtin;
mod profile;

pub use builtin::builtin_profiles;
pub use profile::LanguageProfile;

use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::checker::AdapterSet;

/// Reserved tag meaning "detect the language automatically"
pub const AUTO_TAG: &str = "auto";

/// True for the auto sentinel and for an empty selector
pub fn is_auto(tag: &str) -> bool {
    let tag = tag.trim();
    tag.is_empty() || tag.eq_ignore_ascii_case(AUTO_TAG)
}

/// Fatal configuration problems found while building the registry
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Language '{tag}' references unregistered backend '{backend}'")]
    UnknownBackend { tag: String, backend: String },

    #[error("Language '{0}' has no backends")]
    EmptyBackends(String),

    #[error("Language '{0}' is registered twice")]
    DuplicateTag(String),

    #[error("Default language '{0}' is not registered")]
    MissingDefault(String),
}

/// A detector code claimed by more than one profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorCollision {
    pub detector_tag: String,
    /// Profile that keeps the code
    pub kept: String,
    pub ignored: String,
}

/// Collects profiles before validation
#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    profiles: Vec<LanguageProfile>,
    default_tag: String,
}

impl RegistryBuilder {
    pub fn profile(mut self, profile: LanguageProfile) -> Self {
        self.profiles.push(profile);
        self
    }

    pub fn profiles(mut self, profiles: impl IntoIterator<Item = LanguageProfile>) -> Self {
        self.profiles.extend(profiles);
        self
    }

    /// Tag of the catch-all profile; the auto sentinel unless changed
    pub fn default_tag(mut self, tag: impl Into<String>) -> Self {
        self.default_tag = tag.into().trim().to_lowercase();
        self
    }

    /// Validates every profile against the adapters that actually exist
    ///
    /// Detector-tag collisions are not fatal: the first profile keeps the
    /// code, a warning is logged and the collision is kept on the registry.
    pub fn build(self, adapters: &AdapterSet) -> Result<LanguageRegistry, RegistryError> {
        let mut by_tag = HashMap::new();
        let mut by_detector_tag: HashMap<String, usize> = HashMap::new();
        let mut profiles: Vec<Arc<LanguageProfile>> = Vec::with_capacity(self.profiles.len());
        let mut collisions = Vec::new();

        for (index, profile) in self.profiles.into_iter().enumerate() {
            if by_tag.insert(profile.tag.clone(), index).is_some() {
                return Err(RegistryError::DuplicateTag(profile.tag));
            }
            if profile.backend_ids.is_empty() {
                return Err(RegistryError::EmptyBackends(profile.tag));
            }
            if let Some(missing) = profile.backend_ids.iter().find(|id| !adapters.contains(id)) {
                return Err(RegistryError::UnknownBackend {
                    tag: profile.tag.clone(),
                    backend: missing.clone(),
                });
            }

            for code in &profile.detector_tags {
                match by_detector_tag.get(code) {
                    Some(&owner) => {
                        let kept: &Arc<LanguageProfile> = &profiles[owner];
                        warn!(
                            detector_tag = %code,
                            kept = %kept.tag,
                            ignored = %profile.tag,
                            "Detector tag claimed by two languages, keeping the first"
                        );
                        collisions.push(DetectorCollision {
                            detector_tag: code.clone(),
                            kept: kept.tag.clone(),
                            ignored: profile.tag.clone(),
                        });
                    }
                    None => {
                        by_detector_tag.insert(code.clone(), index);
                    }
                }
            }

            profiles.push(Arc::new(profile));
        }

        let default_index = *by_tag
            .get(&self.default_tag)
            .ok_or_else(|| RegistryError::MissingDefault(self.default_tag.clone()))?;

        debug!(
            languages = profiles.len(),
            detector_tags = by_detector_tag.len(),
            default = %self.default_tag,
            "Language registry built"
        );

        Ok(LanguageRegistry {
            profiles,
            by_tag,
            by_detector_tag,
            default_index,
            collisions,
        })
    }
}

/// Immutable, validated language table
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    profiles: Vec<Arc<LanguageProfile>>,
    by_tag: HashMap<String, usize>,
    by_detector_tag: HashMap<String, usize>,
    default_index: usize,
    collisions: Vec<DetectorCollision>,
}

impl LanguageRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder {
            profiles: Vec::new(),
            default_tag: AUTO_TAG.to_string(),
        }
    }

    /// The built-in table validated against `adapters`
    pub fn with_defaults(adapters: &AdapterSet) -> Result<Self, RegistryError> {
        Self::builder().profiles(builtin_profiles()).build(adapters)
    }

    /// Profile for `tag`, or the default profile when the tag is unknown
    pub fn lookup(&self, tag: &str) -> Arc<LanguageProfile> {
        self.get(tag).unwrap_or_else(|| self.default_profile())
    }

    /// Profile for `tag` if it is registered
    pub fn get(&self, tag: &str) -> Option<Arc<LanguageProfile>> {
        self.by_tag
            .get(&tag.trim().to_lowercase())
            .map(|&i| Arc::clone(&self.profiles[i]))
    }

    /// True when `tag` names a registered profile other than the auto sentinel
    pub fn is_explicit(&self, tag: &str) -> bool {
        !is_auto(tag) && self.by_tag.contains_key(&tag.trim().to_lowercase())
    }

    pub fn default_profile(&self) -> Arc<LanguageProfile> {
        Arc::clone(&self.profiles[self.default_index])
    }

    /// Profile claiming an external detector code
    pub fn profile_for_detector_tag(&self, code: &str) -> Option<Arc<LanguageProfile>> {
        self.by_detector_tag
            .get(&code.trim().to_lowercase())
            .map(|&i| Arc::clone(&self.profiles[i]))
    }

    /// Detector codes that were claimed twice while building
    pub fn detector_collisions(&self) -> &[DetectorCollision] {
        &self.collisions
    }

    /// All profiles in registration order
    pub fn profiles(&self) -> impl Iterator<Item = &LanguageProfile> {
        self.profiles.iter().map(Arc::as_ref)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
