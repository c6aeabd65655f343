// Transmit Profiles - Profile Store
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Shared profile store and selection state.
//!
//! A single mutex guards the profile map together with every selection
//! field. Lock poisoning is handled gracefully by recovering the inner
//! value, as poison indicates a panic in another thread but the data itself
//! may still be valid.
//!
//! Merging is two-phase: the map is rewritten under the lock, the lock is
//! released, and only then is the rule matcher re-run. The re-run takes
//! the lock itself and reads whatever device state is recorded by then.

use std::collections::BTreeMap;
use std::sync::Mutex;

use tracing::{info, trace, warn};

use crate::matcher::RuleSelection;
use crate::models::defaults::DEFAULT_PROFILE;
use crate::models::{DeviceState, Error, Result, TransmitProfile, TransmitRule, TIMER_DISABLED};

/// Which profile and rule are active, and for which device state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    /// Name of the active profile.
    pub active_profile: String,
    /// Index of the active rule within that profile.
    pub active_rule: usize,
    /// Last device state reported.
    pub device_state: DeviceState,
    /// Set whenever the rule is re-evaluated, cleared when timers are read.
    pub timers_dirty: bool,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            active_profile: DEFAULT_PROFILE.to_string(),
            active_rule: 0,
            device_state: DeviceState::default(),
            timers_dirty: true,
        }
    }
}

#[derive(Debug, Default)]
struct StoreState {
    profiles: BTreeMap<String, TransmitProfile>,
    selection: SelectionState,
}

impl StoreState {
    /// Rule currently selected, if the selection still points at a loaded profile.
    fn active_rule(&self) -> Result<&TransmitRule> {
        let name = &self.selection.active_profile;
        self.profiles
            .get(name)
            .and_then(|p| p.rules.get(self.selection.active_rule))
            .ok_or_else(|| Error::UnusableState(name.clone()))
    }

    /// First phase of a merge.
    fn merge(&mut self, decoded: Vec<TransmitProfile>) {
        self.profiles.retain(|_, profile| profile.is_default());
        for profile in decoded {
            self.profiles.insert(profile.name.clone(), profile);
        }

        if !self.profiles.contains_key(&self.selection.active_profile) {
            self.selection.active_profile = DEFAULT_PROFILE.to_string();
            trace!("Switched to profile {}", self.selection.active_profile);
        }

        trace!("Profiles:");
        for (i, name) in self.profiles.keys().enumerate() {
            let marker = if *name == self.selection.active_profile {
                " [active]"
            } else {
                ""
            };
            trace!("[{}] {}{}", i, name, marker);
        }

        self.selection.active_rule = 0;
    }

    /// Select the rule of the active profile matching the recorded device
    /// state and mark the timers dirty.
    fn select_rule(&mut self) -> bool {
        self.selection.timers_dirty = true;
        let device_state = self.selection.device_state;

        let Some(profile) = self.profiles.get(&self.selection.active_profile) else {
            self.selection.active_rule = 0;
            return false;
        };

        let selection = RuleSelection::select(profile, device_state);
        self.selection.active_rule = selection.index;
        if let Some(rule) = profile.rules.get(selection.index) {
            info!(
                "profile={} state={} rule={} timers={:?}",
                profile.name, device_state, selection.index, rule.timers
            );
        }
        selection.matched
    }
}

/// Lock-protected store of transmit profiles and the active selection.
#[derive(Debug, Default)]
pub struct ProfileStore {
    state: Mutex<StoreState>,
}

impl ProfileStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a closure under the store lock, recovering from poison if needed.
    fn with_state<F, R>(&self, context: &str, f: F) -> R
    where
        F: FnOnce(&mut StoreState) -> R,
    {
        match self.state.lock() {
            Ok(mut guard) => f(&mut *guard),
            Err(poisoned) => {
                warn!("Mutex poisoned in {}, recovering", context);
                f(&mut *poisoned.into_inner())
            }
        }
    }

    // ========================================================================
    // Profiles
    // ========================================================================

    pub fn is_empty(&self) -> bool {
        self.with_state("is_empty", |s| s.profiles.is_empty())
    }

    /// Replace all custom profiles with `decoded` and re-match the active rule.
    ///
    /// Custom profiles are dropped even when `decoded` is empty.
    pub fn merge(&self, decoded: Vec<TransmitProfile>) {
        self.with_state("merge", |s| s.merge(decoded));
        self.rematch();
    }

    /// Merge `profiles` only if the store is still empty once the lock is held.
    /// Returns true if the merge happened.
    pub fn merge_if_empty(&self, profiles: Vec<TransmitProfile>) -> bool {
        let merged = self.with_state("merge_if_empty", |s| {
            let empty = s.profiles.is_empty();
            if empty {
                s.merge(profiles);
            }
            empty
        });
        if merged {
            self.rematch();
        }
        merged
    }

    /// Names of all loaded profiles, sorted.
    pub fn profile_names(&self) -> Vec<String> {
        self.with_state("profile_names", |s| s.profiles.keys().cloned().collect())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.with_state("contains", |s| s.profiles.contains_key(name))
    }

    /// Copy of every loaded profile, sorted by name.
    pub fn snapshot(&self) -> Vec<TransmitProfile> {
        self.with_state("snapshot", |s| s.profiles.values().cloned().collect())
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Activate a profile by name. An unknown name activates the default
    /// profile and returns false.
    pub fn select_profile(&self, name: &str) -> bool {
        let found = self.with_state("select_profile", |s| {
            let found = s.profiles.contains_key(name);
            if found {
                s.selection.active_profile = name.to_string();
                info!("selected profile {} ...", name);
            } else {
                warn!("profile {} not found!", name);
                s.selection.active_profile = DEFAULT_PROFILE.to_string();
                warn!("selected profile {} instead", DEFAULT_PROFILE);
            }
            found
        });
        self.rematch();
        found
    }

    /// Record the device state and select the matching rule of the active
    /// profile. Returns false when no rule matched and the first rule was
    /// used as fallback, or when the active profile is not loaded.
    pub fn update_states(&self, device_state: DeviceState) -> bool {
        self.with_state("update_states", |s| {
            s.selection.device_state = device_state;
            s.select_rule()
        })
    }

    /// Re-run the matcher against the device state recorded at the time
    /// the lock is taken.
    pub fn rematch(&self) -> bool {
        self.with_state("rematch", |s| s.select_rule())
    }

    /// Active rule's timers in milliseconds. Clears the dirty flag.
    ///
    /// If the selection does not resolve to a rule, `tier_count` disabled
    /// timers are returned.
    pub fn timers_ms(&self, tier_count: usize) -> Vec<i64> {
        self.with_state("timers_ms", |s| {
            s.selection.timers_dirty = false;
            match s.active_rule() {
                Ok(rule) => rule.timers.iter().map(|t| i64::from(*t) * 1000).collect(),
                Err(e) => {
                    warn!("{}, disabling all transmission timers.", e);
                    vec![i64::from(TIMER_DISABLED); tier_count]
                }
            }
        })
    }

    pub fn is_timer_update_required(&self) -> bool {
        self.with_state("is_timer_update_required", |s| s.selection.timers_dirty)
    }

    pub fn active_profile(&self) -> String {
        self.with_state("active_profile", |s| s.selection.active_profile.clone())
    }

    pub fn device_state(&self) -> DeviceState {
        self.with_state("device_state", |s| s.selection.device_state)
    }

    /// Copy of the full selection state.
    pub fn selection(&self) -> SelectionState {
        self.with_state("selection", |s| s.selection.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NetworkCost, PowerSource};
    use crate::parser::baseline_profiles;

    fn custom(name: &str, timers: Vec<i32>) -> TransmitProfile {
        let mut profile = TransmitProfile::new(name);
        profile.add_rule(TransmitRule::new(timers));
        profile
    }

    fn loaded_store() -> ProfileStore {
        let store = ProfileStore::new();
        store.merge(baseline_profiles(3));
        store
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = ProfileStore::new();
        assert!(store.is_empty());
        assert_eq!(store.selection(), SelectionState::default());
        assert_eq!(store.active_profile(), "REAL_TIME");
    }

    #[test]
    fn test_timers_on_empty_store_are_disabled() {
        let store = ProfileStore::new();
        assert_eq!(store.timers_ms(3), vec![-1, -1, -1]);
        assert!(!store.is_timer_update_required());
    }

    #[test]
    fn test_merge_replaces_custom_only() {
        let store = loaded_store();
        store.merge(vec![custom("A", vec![4, 2, 1])]);
        assert!(store.contains("A"));

        store.merge(vec![custom("B", vec![4, 2, 1])]);
        assert!(!store.contains("A"));
        assert!(store.contains("B"));
        assert!(store.contains("REAL_TIME"));
        assert_eq!(store.profile_names().len(), 4);
    }

    #[test]
    fn test_empty_merge_drops_customs() {
        let store = loaded_store();
        store.merge(vec![custom("A", vec![4, 2, 1])]);
        assert!(store.select_profile("A"));

        store.merge(Vec::new());
        assert!(!store.contains("A"));
        assert_eq!(store.active_profile(), "REAL_TIME");
        assert_eq!(store.profile_names().len(), 3);
    }

    #[test]
    fn test_custom_can_override_default() {
        let store = loaded_store();
        store.merge(vec![custom("REAL_TIME", vec![2, 2, 2])]);
        assert_eq!(store.timers_ms(3), vec![2000, 2000, 2000]);

        // A later reload does not remove the overridden default
        store.merge(Vec::new());
        assert_eq!(store.timers_ms(3), vec![2000, 2000, 2000]);
    }

    #[test]
    fn test_merge_if_empty_runs_once() {
        let store = ProfileStore::new();
        assert!(store.merge_if_empty(baseline_profiles(3)));
        store.merge(vec![custom("A", vec![4, 2, 1])]);
        assert!(!store.merge_if_empty(baseline_profiles(3)));
        assert!(store.contains("A"));
    }

    #[test]
    fn test_select_unknown_profile() {
        let store = loaded_store();
        assert!(store.select_profile("BEST_EFFORT"));
        assert_eq!(store.active_profile(), "BEST_EFFORT");
        assert!(!store.select_profile("DOES_NOT_EXIST"));
        assert_eq!(store.active_profile(), "REAL_TIME");
    }

    #[test]
    fn test_update_states_records_state_and_dirty() {
        let store = loaded_store();
        store.timers_ms(3);
        assert!(!store.is_timer_update_required());

        let state = DeviceState::new(NetworkCost::Metered, PowerSource::Charging);
        assert!(store.update_states(state));
        assert!(store.is_timer_update_required());
        assert_eq!(store.device_state(), state);
        assert_eq!(store.selection().active_rule, 3);
        assert_eq!(store.timers_ms(3), vec![12000, 6000, 3000]);
        assert!(!store.is_timer_update_required());
    }

    #[test]
    fn test_update_states_without_match() {
        let store = loaded_store();
        let mut profile = TransmitProfile::new("STRICT");
        profile.add_rule(TransmitRule::with_state(
            NetworkCost::Unmetered,
            PowerSource::Charging,
            vec![4, 2, 1],
        ));
        profile.add_rule(TransmitRule::with_state(
            NetworkCost::Metered,
            PowerSource::Charging,
            vec![8, 4, 2],
        ));
        store.merge(vec![profile]);
        store.select_profile("STRICT");

        let matched = store.update_states(DeviceState::new(NetworkCost::Roaming, PowerSource::Battery));
        assert!(!matched);
        assert!(store.is_timer_update_required());
        assert_eq!(store.timers_ms(3), vec![4000, 2000, 1000]);
    }

    #[test]
    fn test_rematch_uses_latest_device_state() {
        let store = loaded_store();

        // A notification lands between the two phases of a merge
        store.with_state("test", |s| s.merge(Vec::new()));
        let notified = DeviceState::new(NetworkCost::Metered, PowerSource::Charging);
        store.update_states(notified);
        assert!(store.rematch());

        assert_eq!(store.device_state(), notified);
        assert_eq!(store.selection().active_rule, 3);
        assert_eq!(store.timers_ms(3), vec![12000, 6000, 3000]);
    }

    #[test]
    fn test_select_profile_keeps_device_state() {
        let store = loaded_store();
        let state = DeviceState::new(NetworkCost::Unmetered, PowerSource::Charging);
        store.update_states(state);
        store.timers_ms(3);

        assert!(store.select_profile("BEST_EFFORT"));
        assert_eq!(store.device_state(), state);
        assert!(store.is_timer_update_required());
        assert_eq!(store.timers_ms(3), vec![36000, 18000, 9000]);
    }

    #[test]
    fn test_merge_keeps_device_state() {
        let store = loaded_store();
        store.update_states(DeviceState::new(NetworkCost::Unknown, PowerSource::Unknown));
        store.merge(vec![custom("A", vec![4, 2, 1])]);
        assert_eq!(store.timers_ms(3), vec![8000, 4000, 2000]);
    }
}
