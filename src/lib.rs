// Transmit Profiles - Shared Library
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! # Transmit Profiles
//!
//! Adaptive upload scheduling for telemetry clients. Given the device's
//! network cost class and power source, the engine picks a rule from the
//! active transmit profile and reports one upload delay per priority tier.
//!
//! - **Models**: Profiles, rules, taxonomy, engine configuration, errors
//! - **Parser**: JSON payload decoding with hard limits
//! - **Matcher**: First-match rule selection
//! - **Storage**: Lock-protected profile store and selection state
//! - **Transmit**: The public engine API
//!
//! ## Example
//!
//! ```
//! use transmit_profiles::{NetworkCost, PowerSource, TransmitProfiles};
//!
//! let engine = TransmitProfiles::new();
//! engine.set_profile("REAL_TIME");
//! engine.notify_device_state(NetworkCost::Metered, PowerSource::Charging);
//! assert_eq!(engine.timers_ms(), vec![12000, 6000, 3000]);
//! ```

pub mod matcher;
pub mod models;
pub mod parser;
pub mod storage;
pub mod transmit;

// Re-export main types for convenience
pub use models::{
    DefaultProfile, DeviceState, EngineConfig, Error, NetworkCost, PowerSource, Result,
    TransmitProfile, TransmitRule,
};
pub use transmit::TransmitProfiles;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
