// Transmit Profiles - Engine Configuration
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Engine configuration model.
//!
//! Hard limits applied to configuration payloads, plus the timer tier
//! count. Stored as TOML; every field has a default so an empty file is a
//! valid configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::CONFIG_DIR_NAME;

/// Maximum number of profiles accepted in one payload.
pub const MAX_TRANSMIT_PROFILES: usize = 20;

/// Maximum number of rules accepted per profile.
pub const MAX_TRANSMIT_RULES: usize = 16;

/// Number of priority tiers in the baseline profiles.
pub const DEFAULT_TIER_COUNT: usize = 3;

/// Lower bound for the configurable tier count. Rules carry at least as
/// many timers as the baseline profiles.
pub const MIN_TIER_COUNT: usize = DEFAULT_TIER_COUNT;

/// Upper bound for the configurable tier count.
pub const MAX_TIER_COUNT: usize = 8;

/// Engine configuration file name (under the config directory).
pub const CONFIG_FILE_NAME: &str = "engine.toml";

/// Transmit profile engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum profiles per payload.
    #[serde(default = "default_max_profiles")]
    pub max_profiles: usize,

    /// Maximum rules per profile.
    #[serde(default = "default_max_rules")]
    pub max_rules_per_profile: usize,

    /// Number of priority tiers every rule carries.
    #[serde(default = "default_tier_count")]
    pub tier_count: usize,

    /// Auto-correct inconsistent timers when loading profiles.
    #[serde(default = "default_true")]
    pub correct_timers: bool,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_max_profiles() -> usize {
    MAX_TRANSMIT_PROFILES
}

fn default_max_rules() -> usize {
    MAX_TRANSMIT_RULES
}

fn default_tier_count() -> usize {
    DEFAULT_TIER_COUNT
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_profiles: default_max_profiles(),
            max_rules_per_profile: default_max_rules(),
            tier_count: default_tier_count(),
            correct_timers: true,
            log_level: default_log_level(),
        }
    }
}

impl EngineConfig {
    /// Default location of the engine configuration file.
    pub fn default_path() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load the configuration from the default location, if it exists.
    pub fn load() -> Option<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from_file(&path).ok()
        } else {
            None
        }
    }

    /// Load configuration from TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, super::Error> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| super::Error::ConfigReadFailed(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(s: &str) -> Result<Self, super::Error> {
        let config: Self = toml::from_str(s)?;
        Ok(config.normalized())
    }

    /// Clamp out-of-bound values.
    pub fn normalized(mut self) -> Self {
        if !(MIN_TIER_COUNT..=MAX_TIER_COUNT).contains(&self.tier_count) {
            let clamped = self.tier_count.clamp(MIN_TIER_COUNT, MAX_TIER_COUNT);
            warn!(
                "tier_count {} out of range {}..={}, using {}",
                self.tier_count, MIN_TIER_COUNT, MAX_TIER_COUNT, clamped
            );
            self.tier_count = clamped;
        }
        if self.max_profiles == 0 {
            warn!("max_profiles cannot be 0, using {}", MAX_TRANSMIT_PROFILES);
            self.max_profiles = MAX_TRANSMIT_PROFILES;
        }
        if self.max_rules_per_profile == 0 {
            warn!("max_rules_per_profile cannot be 0, using {}", MAX_TRANSMIT_RULES);
            self.max_rules_per_profile = MAX_TRANSMIT_RULES;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = EngineConfig::from_toml("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.max_profiles, 20);
        assert_eq!(config.max_rules_per_profile, 16);
        assert_eq!(config.tier_count, 3);
        assert!(config.correct_timers);
    }

    #[test]
    fn test_partial_toml() {
        let config = EngineConfig::from_toml("max_profiles = 4\ncorrect_timers = false\n").unwrap();
        assert_eq!(config.max_profiles, 4);
        assert!(!config.correct_timers);
        assert_eq!(config.tier_count, DEFAULT_TIER_COUNT);
    }

    #[test]
    fn test_tier_count_clamped() {
        let config = EngineConfig::from_toml("tier_count = 64").unwrap();
        assert_eq!(config.tier_count, MAX_TIER_COUNT);

        let config = EngineConfig::from_toml("tier_count = 0").unwrap();
        assert_eq!(config.tier_count, MIN_TIER_COUNT);

        let config = EngineConfig::from_toml("tier_count = 1").unwrap();
        assert_eq!(config.tier_count, 3);

        let config = EngineConfig::from_toml("tier_count = 5").unwrap();
        assert_eq!(config.tier_count, 5);
    }

    #[test]
    fn test_invalid_toml() {
        let err = EngineConfig::from_toml("max_profiles = \"many\"").unwrap_err();
        assert!(matches!(err, crate::models::Error::ConfigParseFailed(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::load_from_file(Path::new("/nonexistent/engine.toml")).unwrap_err();
        assert!(matches!(err, crate::models::Error::ConfigReadFailed(_)));
    }
}
