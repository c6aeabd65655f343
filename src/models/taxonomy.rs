// Transmit Profiles - Network and Power Taxonomy
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Network cost and power source classes, and the configuration tokens
//! that map onto them.
//!
//! The token tables are built once on first use. A token that is not in a
//! table is treated as if the field were absent, which means `Any`.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::Serialize;

/// Network cost class reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NetworkCost {
    /// Matches every cost class.
    #[default]
    Any,
    /// Cost could not be determined.
    Unknown,
    /// Flat-rate network (Wi-Fi, Ethernet).
    Unmetered,
    /// Pay-per-use network.
    Metered,
    /// Roaming or otherwise restricted network.
    Roaming,
}

/// Power source reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PowerSource {
    /// Matches every power source.
    #[default]
    Any,
    /// Power source could not be determined.
    Unknown,
    /// Running on battery.
    Battery,
    /// Connected to external power.
    Charging,
}

static NET_COST_TOKENS: Lazy<HashMap<&'static str, NetworkCost>> = Lazy::new(|| {
    HashMap::from([
        ("any", NetworkCost::Any),
        ("unknown", NetworkCost::Unknown),
        ("unmetered", NetworkCost::Unmetered),
        ("low", NetworkCost::Unmetered),
        ("metered", NetworkCost::Metered),
        ("high", NetworkCost::Metered),
        ("restricted", NetworkCost::Roaming),
        ("roaming", NetworkCost::Roaming),
    ])
});

static POWER_SOURCE_TOKENS: Lazy<HashMap<&'static str, PowerSource>> = Lazy::new(|| {
    HashMap::from([
        ("any", PowerSource::Any),
        ("unknown", PowerSource::Unknown),
        ("battery", PowerSource::Battery),
        ("charging", PowerSource::Charging),
    ])
});

impl NetworkCost {
    /// Resolve a configuration token, including the `low`/`high`/`restricted` aliases.
    pub fn from_token(token: &str) -> Option<Self> {
        NET_COST_TOKENS.get(token).copied()
    }

    /// Canonical configuration token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Unknown => "unknown",
            Self::Unmetered => "unmetered",
            Self::Metered => "metered",
            Self::Roaming => "roaming",
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Either side being `Any` is a match.
    pub fn matches(&self, other: NetworkCost) -> bool {
        *self == other || self.is_any() || other.is_any()
    }
}

impl PowerSource {
    /// Resolve a configuration token.
    pub fn from_token(token: &str) -> Option<Self> {
        POWER_SOURCE_TOKENS.get(token).copied()
    }

    /// Canonical configuration token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Unknown => "unknown",
            Self::Battery => "battery",
            Self::Charging => "charging",
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Either side being `Any` is a match.
    pub fn matches(&self, other: PowerSource) -> bool {
        *self == other || self.is_any() || other.is_any()
    }
}

impl fmt::Display for NetworkCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for PowerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Last-known device condition used to pick a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DeviceState {
    pub net_cost: NetworkCost,
    pub power_state: PowerSource,
}

impl DeviceState {
    pub fn new(net_cost: NetworkCost, power_state: PowerSource) -> Self {
        Self {
            net_cost,
            power_state,
        }
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.net_cost, self.power_state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_net_cost_aliases() {
        assert_eq!(NetworkCost::from_token("low"), Some(NetworkCost::Unmetered));
        assert_eq!(NetworkCost::from_token("unmetered"), Some(NetworkCost::Unmetered));
        assert_eq!(NetworkCost::from_token("high"), Some(NetworkCost::Metered));
        assert_eq!(NetworkCost::from_token("metered"), Some(NetworkCost::Metered));
        assert_eq!(NetworkCost::from_token("restricted"), Some(NetworkCost::Roaming));
        assert_eq!(NetworkCost::from_token("roaming"), Some(NetworkCost::Roaming));
        assert_eq!(NetworkCost::from_token("unknown"), Some(NetworkCost::Unknown));
        assert_eq!(NetworkCost::from_token("any"), Some(NetworkCost::Any));
    }

    #[test]
    fn test_unrecognized_tokens() {
        assert_eq!(NetworkCost::from_token("cellular"), None);
        assert_eq!(NetworkCost::from_token("HIGH"), None);
        assert_eq!(PowerSource::from_token("solar"), None);
    }

    #[test]
    fn test_power_source_tokens() {
        assert_eq!(PowerSource::from_token("battery"), Some(PowerSource::Battery));
        assert_eq!(PowerSource::from_token("charging"), Some(PowerSource::Charging));
        assert_eq!(PowerSource::from_token("unknown"), Some(PowerSource::Unknown));
        assert_eq!(PowerSource::from_token("any"), Some(PowerSource::Any));
    }

    #[test]
    fn test_canonical_tokens_round_trip() {
        for cost in [
            NetworkCost::Any,
            NetworkCost::Unknown,
            NetworkCost::Unmetered,
            NetworkCost::Metered,
            NetworkCost::Roaming,
        ] {
            assert_eq!(NetworkCost::from_token(cost.as_str()), Some(cost));
        }
    }

    #[test]
    fn test_any_matches_both_ways() {
        assert!(NetworkCost::Any.matches(NetworkCost::Roaming));
        assert!(NetworkCost::Roaming.matches(NetworkCost::Any));
        assert!(!NetworkCost::Metered.matches(NetworkCost::Unmetered));
        assert!(PowerSource::Battery.matches(PowerSource::Any));
        assert!(!PowerSource::Battery.matches(PowerSource::Charging));
    }

    #[test]
    fn test_serialize_uses_canonical_token() {
        let json = serde_json::to_string(&NetworkCost::Unmetered).unwrap();
        assert_eq!(json, "\"unmetered\"");
    }
}
