// Transmit Profiles - Timer Validation
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Timer consistency checks for transmit rules.
//!
//! Walking from the highest-priority tier (last index) toward the
//! lowest-priority tier (index 0), every enabled timer must be at least
//! the adjacent higher-priority timer and an exact multiple of it. A tier
//! cannot be enabled while the higher-priority tier is disabled.
//! Inconsistent values are corrected in place, never rejected.

use tracing::{trace, warn};

use super::profile::{TransmitProfile, TransmitRule};

/// Correct a rule's timers in place. Returns true if anything changed.
pub fn adjust_timers(rule: &mut TransmitRule) -> bool {
    let Some(&last) = rule.timers.last() else {
        return false;
    };

    let mut corrected = false;
    let mut prev = last;

    for i in (0..rule.timers.len()).rev() {
        let original = rule.timers[i];
        let mut curr = original;

        if curr > 0 {
            if curr < prev {
                curr = prev;
                warn!(
                    "Low-pri timer can't be lower than high-pri: timer[{}] adjusted {}=>{}",
                    i, original, curr
                );
            } else if prev > 0 {
                if curr % prev != 0 {
                    curr = next_multiple(curr, prev);
                    warn!(
                        "Low-pri timer must be multiple of high-pri: timer[{}] adjusted {}=>{}",
                        i, original, curr
                    );
                }
            } else {
                curr = prev;
                warn!(
                    "Low-pri timer can't be on if high-pri is off: timer[{}] adjusted {}=>{}",
                    i, original, curr
                );
            }
        }

        if curr != original {
            rule.timers[i] = curr;
            corrected = true;
        }
        prev = curr;
        trace!("timers[{}]={}", i, curr);
    }

    corrected
}

/// Smallest multiple of `step` strictly above `value`, capped at the
/// largest multiple that fits in an i32.
fn next_multiple(value: i32, step: i32) -> i32 {
    (value / step)
        .checked_add(1)
        .and_then(|n| n.checked_mul(step))
        .unwrap_or((i32::MAX / step) * step)
}

/// Extend a rule to `tier_count` timers by repeating its highest-priority
/// value. Equal neighbours keep a corrected rule consistent. Returns true
/// if timers were added.
pub fn pad_timers(rule: &mut TransmitRule, tier_count: usize) -> bool {
    let Some(&last) = rule.timers.last() else {
        return false;
    };
    if rule.timers.len() >= tier_count {
        return false;
    }
    rule.timers.resize(tier_count, last);
    true
}

/// Run [`adjust_timers`] over every rule of a profile.
/// Returns the number of rules that were corrected.
pub fn adjust_profile(profile: &mut TransmitProfile) -> usize {
    let mut count = 0;
    for (index, rule) in profile.rules.iter_mut().enumerate() {
        if adjust_timers(rule) {
            warn!("Timers auto-corrected for profile {} rule {}", profile.name, index);
            count += 1;
        }
    }
    count
}
