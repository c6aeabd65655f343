// Transmit Profiles - Public Operations
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Transmit profile engine.
//!
//! [`TransmitProfiles`] is the context object a telemetry client creates
//! once at startup and shares (usually through an `Arc`) with everything
//! that needs upload timers. It owns the profile store and the parser
//! limits. None of its operations fail: bad configuration collapses to
//! "zero profiles loaded" and a log line, and every call returns a
//! definite value.

use tracing::{error, info, trace, Level};

use crate::models::defaults::is_default_profile;
use crate::models::{
    DefaultProfile, DeviceState, EngineConfig, NetworkCost, PowerSource, Result, TransmitProfile,
};
use crate::parser::{baseline_profiles, ProfileParser};
use crate::storage::ProfileStore;

/// Adaptive upload scheduling engine.
#[derive(Debug)]
pub struct TransmitProfiles {
    config: EngineConfig,
    parser: ProfileParser,
    store: ProfileStore,
}

impl Default for TransmitProfiles {
    fn default() -> Self {
        Self::new()
    }
}

impl TransmitProfiles {
    /// Create an engine with default limits. Profiles are loaded lazily.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with specific limits.
    pub fn with_config(config: EngineConfig) -> Self {
        let config = config.normalized();
        Self {
            parser: ProfileParser::new(&config),
            config,
            store: ProfileStore::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Load the baseline profiles if nothing is loaded yet.
    fn ensure_defaults(&self) {
        if self.store.is_empty() {
            trace!("Loading default profiles...");
            if self.store.merge_if_empty(baseline_profiles(self.config.tier_count)) {
                info!("Default transmit profiles loaded");
            }
        }
    }

    /// Merge a decode result into the store. Returns the decoded count.
    fn apply(&self, decoded: Result<Vec<TransmitProfile>>) -> usize {
        let profiles = decoded.unwrap_or_else(|e| {
            error!("Transmit profiles parsing failed: {}", e);
            Vec::new()
        });
        let count = profiles.len();
        self.store.merge(profiles);

        if count == 0 {
            error!("Transmit profiles parsing failed! Please check your config to fix above errors.");
        } else {
            info!("Transmit profiles parsing completed successfully [{}]", count);
        }
        count
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Decode a custom payload and merge it. Returns the number of profiles
    /// decoded; 0 means the payload was refused.
    ///
    /// Existing custom profiles are removed whether or not the payload
    /// decodes.
    pub fn load_profiles(&self, payload: &str) -> usize {
        self.ensure_defaults();
        trace!("Loading custom profiles...");
        self.apply(self.parser.parse(payload))
    }

    /// Load custom profiles. Returns true if at least one profile was decoded.
    pub fn load(&self, payload: &str) -> bool {
        let result = self.load_profiles(payload) != 0;
        self.dump();
        result
    }

    /// Drop custom profiles and restore the baseline.
    pub fn reset(&self) {
        self.apply(Ok(baseline_profiles(self.config.tier_count)));
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Activate a profile by name. An unknown name activates `REAL_TIME`
    /// and returns false.
    pub fn set_profile(&self, name: &str) -> bool {
        self.ensure_defaults();
        self.store.select_profile(name)
    }

    /// Activate one of the baseline profiles by ordinal.
    pub fn set_default_profile(&self, profile: DefaultProfile) -> bool {
        self.set_profile(profile.name())
    }

    pub fn active_profile(&self) -> String {
        self.store.active_profile()
    }

    pub fn device_state(&self) -> DeviceState {
        self.store.device_state()
    }

    /// Report a new device state. Returns whether a rule matched; false
    /// means the first rule of the profile is used as a fallback.
    pub fn notify_device_state(&self, net_cost: NetworkCost, power_state: PowerSource) -> bool {
        self.ensure_defaults();
        self.store.update_states(DeviceState::new(net_cost, power_state))
    }

    // ========================================================================
    // Timers
    // ========================================================================

    /// Upload delays of the active rule in milliseconds, lowest-priority
    /// tier first. `-1000` marks a disabled tier. Clears the update flag.
    pub fn timers_ms(&self) -> Vec<i64> {
        self.ensure_defaults();
        self.store.timers_ms(self.config.tier_count)
    }

    /// Check if timers changed since they were last read.
    pub fn is_timer_update_required(&self) -> bool {
        self.store.is_timer_update_required()
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    /// Names of the loaded profiles, sorted.
    pub fn profile_names(&self) -> Vec<String> {
        self.ensure_defaults();
        self.store.profile_names()
    }

    pub fn is_default_profile(&self, name: &str) -> bool {
        is_default_profile(name)
    }

    /// Copy of every loaded profile.
    pub fn snapshot(&self) -> Vec<TransmitProfile> {
        self.ensure_defaults();
        self.store.snapshot()
    }

    /// Serialize the loaded profiles in the payload format.
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    /// Write every profile and rule to the trace log.
    pub fn dump(&self) {
        if !tracing::enabled!(Level::TRACE) {
            return;
        }
        for profile in self.store.snapshot() {
            trace!("name={}", profile.name);
            for (i, rule) in profile.rules.iter().enumerate() {
                trace!(
                    "[{}] netCost={}, powState={}, timers={:?}",
                    i,
                    rule.net_cost,
                    rule.power_state,
                    rule.timers
                );
            }
        }
    }
}
