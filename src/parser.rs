// Transmit Profiles - Configuration Parser
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Decoding of transmit profile payloads.
//!
//! A payload is a JSON array of profile objects:
//!
//! ```json
//! [{ "name": "CUSTOM",
//!    "rules": [
//!      { "netCost": "high", "powerState": "battery", "timers": [16, 8, 4] },
//!      { "timers": [-1, -1, -1] }
//!    ] }]
//! ```
//!
//! Decoding is all-or-nothing. Any limit violation or structural problem
//! discards every profile of the payload; the caller never sees a partial
//! result. Unrecognized `netCost`/`powerState` tokens are not errors, the
//! field simply stays `any`.

use once_cell::sync::Lazy;
use serde_json::{Map, Value};
use tracing::{debug, error, trace, warn};

use crate::models::defaults::DEFAULT_PROFILES_JSON;
use crate::models::validation::{adjust_profile, pad_timers};
use crate::models::{
    EngineConfig, Error, NetworkCost, PowerSource, Result, TransmitProfile, TransmitRule,
};

const ATTR_NAME: &str = "name";
const ATTR_RULES: &str = "rules";
const ATTR_NET_COST: &str = "netCost";
const ATTR_POWER_STATE: &str = "powerState";
const ATTR_TIMERS: &str = "timers";

/// Baseline profiles, decoded once at the default tier count.
static BASELINE: Lazy<Vec<TransmitProfile>> = Lazy::new(|| {
    match ProfileParser::default().parse(DEFAULT_PROFILES_JSON) {
        Ok(profiles) => profiles,
        Err(e) => {
            error!("Embedded baseline profiles failed to parse: {}", e);
            Vec::new()
        }
    }
});

/// Decoded baseline profiles with every rule extended to `tier_count`
/// timers, so they report as many tiers as custom profiles do.
pub fn baseline_profiles(tier_count: usize) -> Vec<TransmitProfile> {
    let mut profiles = BASELINE.clone();
    for rule in profiles.iter_mut().flat_map(|p| p.rules.iter_mut()) {
        pad_timers(rule, tier_count);
    }
    profiles
}

/// Payload decoder bound to a set of limits.
#[derive(Debug, Clone)]
pub struct ProfileParser {
    max_profiles: usize,
    max_rules: usize,
    tier_count: usize,
    correct_timers: bool,
}

impl Default for ProfileParser {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl ProfileParser {
    /// Create a parser using the limits of an engine configuration.
    /// Out-of-range limits are clamped first.
    pub fn new(config: &EngineConfig) -> Self {
        let config = config.clone().normalized();
        Self {
            max_profiles: config.max_profiles,
            max_rules: config.max_rules_per_profile,
            tier_count: config.tier_count,
            correct_timers: config.correct_timers,
        }
    }

    /// Decode a payload into profiles.
    ///
    /// When timer correction is enabled, every decoded rule goes through
    /// [`adjust_timers`](crate::models::adjust_timers) before it is returned.
    pub fn parse(&self, payload: &str) -> Result<Vec<TransmitProfile>> {
        let root: Value = serde_json::from_str(payload)?;
        let Some(entries) = root.as_array() else {
            return Err(Error::ConfigSyntax(
                "expected an array of profiles".to_string(),
            ));
        };

        if entries.len() > self.max_profiles {
            return Err(Error::ProfileCountExceeded {
                count: entries.len(),
                max: self.max_profiles,
            });
        }
        trace!("got {} profiles", entries.len());

        let mut profiles = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            profiles.push(self.parse_profile(index, entry)?);
        }

        if self.correct_timers {
            for profile in &mut profiles {
                adjust_profile(profile);
            }
        }

        Ok(profiles)
    }

    fn parse_profile(&self, index: usize, entry: &Value) -> Result<TransmitProfile> {
        let Some(object) = entry.as_object() else {
            return Err(Error::ConfigSyntax(format!(
                "profile {} is not an object",
                index
            )));
        };

        let name = match object.get(ATTR_NAME) {
            Some(Value::String(name)) => name.clone(),
            _ => {
                return Err(Error::ConfigSyntax(format!(
                    "profile {} has no string \"{}\"",
                    index, ATTR_NAME
                )))
            }
        };

        let Some(rules) = object.get(ATTR_RULES).and_then(Value::as_array) else {
            return Err(Error::ConfigSyntax(format!(
                "profile {} has no \"{}\" array",
                name, ATTR_RULES
            )));
        };

        if rules.len() > self.max_rules {
            return Err(Error::RuleCountExceeded {
                profile: name,
                count: rules.len(),
                max: self.max_rules,
            });
        }

        let mut profile = TransmitProfile::new(name);
        for (rule_index, rule) in rules.iter().enumerate() {
            match rule.as_object() {
                Some(rule) => {
                    let rule = self.parse_rule(&profile.name, rule_index, rule)?;
                    profile.add_rule(rule);
                }
                None => {
                    warn!(
                        "Skipping rule {} of profile {}: not an object",
                        rule_index, profile.name
                    );
                }
            }
        }

        if profile.rules.is_empty() {
            return Err(Error::EmptyProfile(profile.name));
        }
        Ok(profile)
    }

    fn parse_rule(
        &self,
        profile: &str,
        index: usize,
        rule: &Map<String, Value>,
    ) -> Result<TransmitRule> {
        let mut parsed = TransmitRule::new(Vec::new());

        if let Some(token) = token(profile, index, rule, ATTR_NET_COST)? {
            match NetworkCost::from_token(token) {
                Some(cost) => parsed.net_cost = cost,
                None => debug!(
                    "Unrecognized {} \"{}\" in profile {} rule {}, using any",
                    ATTR_NET_COST, token, profile, index
                ),
            }
        }

        if let Some(token) = token(profile, index, rule, ATTR_POWER_STATE)? {
            match PowerSource::from_token(token) {
                Some(power) => parsed.power_state = power,
                None => debug!(
                    "Unrecognized {} \"{}\" in profile {} rule {}, using any",
                    ATTR_POWER_STATE, token, profile, index
                ),
            }
        }

        let timers: &[Value] = match rule.get(ATTR_TIMERS) {
            Some(Value::Array(timers)) => timers.as_slice(),
            None => &[],
            Some(_) => {
                return Err(Error::ConfigSyntax(format!(
                    "rule {} of profile {}: \"{}\" is not an array",
                    index, profile, ATTR_TIMERS
                )))
            }
        };

        for timer in timers {
            let Some(value) = timer.as_i64().or_else(|| timer.as_f64().map(|f| f as i64)) else {
                // Non-numeric entries are ignored
                continue;
            };
            let value = i32::try_from(value).map_err(|_| Error::TimerOutOfRange {
                profile: profile.to_string(),
                rule: index,
                value: timer.to_string(),
            })?;
            parsed.timers.push(value);
        }

        if parsed.timers.len() < self.tier_count {
            return Err(Error::InvalidTimers {
                profile: profile.to_string(),
                rule: index,
                count: parsed.timers.len(),
                min: self.tier_count,
            });
        }
        if parsed.timers.len() > self.tier_count {
            warn!(
                "Rule {} of profile {} has {} timers, keeping the first {}",
                index,
                profile,
                parsed.timers.len(),
                self.tier_count
            );
            parsed.timers.truncate(self.tier_count);
        }

        Ok(parsed)
    }
}

/// Optional string attribute of a rule. Present but not a string is an error.
fn token<'a>(
    profile: &str,
    index: usize,
    rule: &'a Map<String, Value>,
    key: &str,
) -> Result<Option<&'a str>> {
    match rule.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(Error::ConfigSyntax(format!(
            "rule {} of profile {}: \"{}\" must be a string, got {}",
            index, profile, key, other
        ))),
    }
}
