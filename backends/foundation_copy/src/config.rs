//! Policies for the copy operations.
//!
//! A [`CopyConfig`] can be built in code or loaded from TOML:
//!
//! ```toml
//! cycles = "preserve"
//! unsupported = "reject"
//! max_depth = 512
//! ```

use serde::Deserialize;

use crate::errors::{ConfigError, ConfigResult};

pub const DEFAULT_MAX_DEPTH: usize = 512;

/// What a deep copy does when it reaches a container that is already being
/// copied further up the same descent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePolicy {
    /// Reproduce the cycle in the copy using the new container.
    #[default]
    Preserve,
    /// Fail with [`crate::CopyError::Cycle`].
    Reject,
}

/// What a deep copy does with values that have no structural
/// representation, such as [`crate::Function`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnsupportedPolicy {
    /// Fail with [`crate::CopyError::Unsupported`] naming the entry.
    #[default]
    Reject,
    /// Drop the entry from the copy and log a warning.
    Omit,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CopyConfig {
    pub cycles: CyclePolicy,
    pub unsupported: UnsupportedPolicy,
    /// Deepest container nesting a deep copy will follow.
    pub max_depth: usize,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            cycles: CyclePolicy::default(),
            unsupported: UnsupportedPolicy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CopyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_cycles(mut self, cycles: CyclePolicy) -> Self {
        self.cycles = cycles;
        self
    }

    #[must_use]
    pub fn with_unsupported(mut self, unsupported: UnsupportedPolicy) -> Self {
        self.unsupported = unsupported;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parses a TOML document; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Fails on malformed TOML, unknown fields or a `max_depth` of zero.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: CopyConfig = toml::from_str(content)?;
        config.validate()
    }

    /// Reads and parses the TOML file at `target`.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, plus everything
    /// [`CopyConfig::from_toml_str`] rejects.
    pub fn from_path<V: Into<std::path::PathBuf>>(target: V) -> ConfigResult<Self> {
        let target_path = target.into();
        let config_content = std::fs::read_to_string(target_path)?;
        Self::from_toml_str(&config_content)
    }

    /// # Errors
    ///
    /// Fails when `max_depth` is zero, since no container could be copied.
    pub fn validate(self) -> ConfigResult<Self> {
        if self.max_depth == 0 {
            return Err(ConfigError::InvalidLimit("max_depth must be at least 1"));
        }
        Ok(self)
    }
}
