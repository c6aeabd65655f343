// Transmit Profiles - Profile Data Model
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Transmit profile data model.
//!
//! A profile is a named, ordered list of rules. Each rule pairs a
//! network-cost/power-source matcher with one upload delay per priority
//! tier. Timers are stored in seconds, lowest-priority tier first, and
//! `-1` disables automatic flushing for a tier.

use serde::Serialize;

use super::defaults::is_default_profile;
use super::taxonomy::{NetworkCost, PowerSource};

/// Timer value that disables automatic flushing for a tier.
pub const TIMER_DISABLED: i32 = -1;

/// One matching clause of a transmit profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransmitRule {
    /// Network cost this rule applies to.
    #[serde(rename = "netCost", skip_serializing_if = "NetworkCost::is_any")]
    pub net_cost: NetworkCost,
    /// Power source this rule applies to.
    #[serde(rename = "powerState", skip_serializing_if = "PowerSource::is_any")]
    pub power_state: PowerSource,
    /// Upload delays in seconds, lowest-priority tier first.
    pub timers: Vec<i32>,
}

impl TransmitRule {
    /// Create an unconstrained rule with the given timers.
    pub fn new(timers: Vec<i32>) -> Self {
        Self {
            net_cost: NetworkCost::Any,
            power_state: PowerSource::Any,
            timers,
        }
    }

    /// Create a rule constrained to a device state.
    pub fn with_state(net_cost: NetworkCost, power_state: PowerSource, timers: Vec<i32>) -> Self {
        Self {
            net_cost,
            power_state,
            timers,
        }
    }

    /// A rule with no constraints acts as a catch-all.
    pub fn is_catch_all(&self) -> bool {
        self.net_cost.is_any() && self.power_state.is_any()
    }

    /// Check whether every tier is disabled.
    pub fn is_disabled(&self) -> bool {
        self.timers.iter().all(|t| *t <= 0)
    }
}

/// A named set of transmit rules. First match wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransmitProfile {
    pub name: String,
    pub rules: Vec<TransmitRule>,
}

impl TransmitProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a rule at the end of the list.
    pub fn add_rule(&mut self, rule: TransmitRule) {
        self.rules.push(rule);
    }

    /// Check if this profile belongs to the protected baseline set.
    pub fn is_default(&self) -> bool {
        is_default_profile(&self.name)
    }

    /// Check if the last rule is a catch-all.
    pub fn has_catch_all(&self) -> bool {
        self.rules.last().map(|r| r.is_catch_all()).unwrap_or(false)
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catch_all_rule() {
        let rule = TransmitRule::new(vec![-1, -1, -1]);
        assert!(rule.is_catch_all());
        assert!(rule.is_disabled());

        let rule = TransmitRule::with_state(NetworkCost::Metered, PowerSource::Any, vec![16, 8, 4]);
        assert!(!rule.is_catch_all());
        assert!(!rule.is_disabled());
    }

    #[test]
    fn test_profile_catch_all_detection() {
        let mut profile = TransmitProfile::new("CUSTOM");
        assert!(!profile.has_catch_all());
        profile.add_rule(TransmitRule::with_state(
            NetworkCost::Unmetered,
            PowerSource::Charging,
            vec![4, 2, 1],
        ));
        assert!(!profile.has_catch_all());
        profile.add_rule(TransmitRule::new(vec![8, 4, 2]));
        assert!(profile.has_catch_all());
        assert_eq!(profile.rule_count(), 2);
        assert!(!profile.is_default());
    }

    #[test]
    fn test_rule_serialization_omits_any() {
        let rule = TransmitRule::with_state(NetworkCost::Any, PowerSource::Battery, vec![8, 4, 2]);
        let json = serde_json::to_string(&rule).unwrap();
        assert_eq!(json, r#"{"powerState":"battery","timers":[8,4,2]}"#);
    }
}
