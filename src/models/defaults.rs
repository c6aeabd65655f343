// Transmit Profiles - Baseline Profiles
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Built-in transmit profiles.
//!
//! The baseline payload is embedded as JSON and goes through the same
//! parser as custom configuration. Its three profile names are protected:
//! custom payloads may override them but a reload never removes them.

use std::fmt;

use once_cell::sync::Lazy;

/// Profile selected when nothing else is active or the requested one is missing.
pub const DEFAULT_PROFILE: &str = "REAL_TIME";

/// Names of the protected baseline profiles.
pub const DEFAULT_PROFILE_NAMES: [&str; 3] = ["REAL_TIME", "NEAR_REAL_TIME", "BEST_EFFORT"];

/// Embedded baseline configuration. Timers are in seconds, `-1` = disabled.
pub const DEFAULT_PROFILES_JSON: &str = r#"
[{
    "name": "REAL_TIME",
    "rules": [
    { "netCost": "restricted",                              "timers": [ -1, -1, -1 ] },
    { "netCost": "high",        "powerState": "unknown",    "timers": [ 16,  8,  4 ] },
    { "netCost": "high",        "powerState": "battery",    "timers": [ 16,  8,  4 ] },
    { "netCost": "high",        "powerState": "charging",   "timers": [ 12,  6,  3 ] },
    { "netCost": "low",         "powerState": "unknown",    "timers": [  8,  4,  2 ] },
    { "netCost": "low",         "powerState": "battery",    "timers": [  8,  4,  2 ] },
    { "netCost": "low",         "powerState": "charging",   "timers": [  4,  2,  1 ] },
    { "netCost": "unknown",     "powerState": "unknown",    "timers": [  8,  4,  2 ] },
    { "netCost": "unknown",     "powerState": "battery",    "timers": [  8,  4,  2 ] },
    { "netCost": "unknown",     "powerState": "charging",   "timers": [  4,  2,  1 ] },
    {                                                       "timers": [ -1, -1, -1 ] }
    ]
}, {
    "name": "NEAR_REAL_TIME",
    "rules": [
    { "netCost": "restricted",                              "timers": [ -1, -1, -1 ] },
    { "netCost": "high",        "powerState": "unknown",    "timers": [ -1, 24, 12 ] },
    { "netCost": "high",        "powerState": "battery",    "timers": [ -1, 24, 12 ] },
    { "netCost": "high",        "powerState": "charging",   "timers": [ -1, 18,  9 ] },
    { "netCost": "low",         "powerState": "unknown",    "timers": [ 24, 12,  6 ] },
    { "netCost": "low",         "powerState": "battery",    "timers": [ 24, 12,  6 ] },
    { "netCost": "low",         "powerState": "charging",   "timers": [ 12,  6,  3 ] },
    { "netCost": "unknown",     "powerState": "unknown",    "timers": [ 24, 12,  6 ] },
    { "netCost": "unknown",     "powerState": "battery",    "timers": [ 24, 12,  6 ] },
    { "netCost": "unknown",     "powerState": "charging",   "timers": [ 12,  6,  3 ] },
    {                                                       "timers": [ -1, -1, -1 ] }
    ]
}, {
    "name": "BEST_EFFORT",
    "rules": [
    { "netCost": "restricted",                              "timers": [ -1, -1, -1 ] },
    { "netCost": "high",        "powerState": "unknown",    "timers": [ -1, 72, 36 ] },
    { "netCost": "high",        "powerState": "battery",    "timers": [ -1, 72, 36 ] },
    { "netCost": "high",        "powerState": "charging",   "timers": [ -1, 54, 27 ] },
    { "netCost": "low",         "powerState": "unknown",    "timers": [ 72, 36, 18 ] },
    { "netCost": "low",         "powerState": "battery",    "timers": [ 72, 36, 18 ] },
    { "netCost": "low",         "powerState": "charging",   "timers": [ 36, 18,  9 ] },
    { "netCost": "unknown",     "powerState": "unknown",    "timers": [ 72, 36, 18 ] },
    { "netCost": "unknown",     "powerState": "battery",    "timers": [ 72, 36, 18 ] },
    { "netCost": "unknown",     "powerState": "charging",   "timers": [ 36, 18,  9 ] },
    {                                                       "timers": [ -1, -1, -1 ] }
    ]
}]
"#;

/// Check if a name belongs to the protected baseline set.
pub fn is_default_profile(name: &str) -> bool {
    DEFAULT_PROFILE_NAMES.contains(&name)
}

/// Baseline names sorted once into ordinal order.
static ORDERED_NAMES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let mut names = DEFAULT_PROFILE_NAMES.to_vec();
    names.sort_unstable_by(|a, b| b.cmp(a));
    names
});

/// Baseline names in ordinal order (reverse lexicographic).
pub fn default_profile_names() -> &'static [&'static str] {
    &ORDERED_NAMES
}

/// Ordinal selector for the baseline profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultProfile {
    RealTime = 0,
    NearRealTime = 1,
    BestEffort = 2,
}

impl DefaultProfile {
    pub fn all() -> &'static [DefaultProfile] {
        &[Self::RealTime, Self::NearRealTime, Self::BestEffort]
    }

    pub fn ordinal(&self) -> usize {
        *self as usize
    }

    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::all().get(ordinal).copied()
    }

    /// Resolve the ordinal against the ordered baseline names.
    pub fn name(&self) -> &'static str {
        let names = default_profile_names();
        // The ordinal range and the name set have the same size.
        names[self.ordinal().min(names.len() - 1)]
    }
}

impl fmt::Display for DefaultProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_names_reverse_order() {
        assert_eq!(
            default_profile_names(),
            ["REAL_TIME", "NEAR_REAL_TIME", "BEST_EFFORT"]
        );
    }

    #[test]
    fn test_ordinal_resolution() {
        assert_eq!(DefaultProfile::RealTime.name(), "REAL_TIME");
        assert_eq!(DefaultProfile::NearRealTime.name(), "NEAR_REAL_TIME");
        assert_eq!(DefaultProfile::BestEffort.name(), "BEST_EFFORT");
        assert_eq!(DefaultProfile::from_ordinal(1), Some(DefaultProfile::NearRealTime));
        assert_eq!(DefaultProfile::from_ordinal(3), None);
    }

    #[test]
    fn test_is_default_profile() {
        assert!(is_default_profile("BEST_EFFORT"));
        assert!(!is_default_profile("best_effort"));
        assert!(!is_default_profile("CUSTOM"));
        assert!(is_default_profile(DEFAULT_PROFILE));
    }
}
