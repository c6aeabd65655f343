// Transmit Profiles - Rule Matcher
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Device-state to rule matching.
//!
//! Rules are scanned in order and the first one whose network cost and
//! power source both match wins. `Any` on either side of a comparison is
//! a match.

use crate::models::{DeviceState, TransmitProfile, TransmitRule};

/// Check a single rule against a device state.
pub fn rule_matches(rule: &TransmitRule, state: DeviceState) -> bool {
    rule.net_cost.matches(state.net_cost) && rule.power_state.matches(state.power_state)
}

/// Index of the first rule matching the device state.
pub fn find_rule(rules: &[TransmitRule], state: DeviceState) -> Option<usize> {
    rules.iter().position(|rule| rule_matches(rule, state))
}

/// Outcome of matching a profile against a device state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSelection {
    /// Selected rule index. Falls back to 0 when nothing matched.
    pub index: usize,
    /// Whether a rule actually matched.
    pub matched: bool,
}

impl RuleSelection {
    /// Select a rule in a profile. Without a match the first (most
    /// restrictive) rule is used.
    pub fn select(profile: &TransmitProfile, state: DeviceState) -> Self {
        match find_rule(&profile.rules, state) {
            Some(index) => Self {
                index,
                matched: true,
            },
            None => Self {
                index: 0,
                matched: false,
            },
        }
    }
}
