// Transmit Profiles - Data Model
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! # Transmit Profile Data Model
//!
//! Shared types used by the parser, the profile store and the rule
//! matcher:
//!
//! - **Taxonomy**: Network cost and power source classes
//! - **Profile**: Named rule lists with per-tier timers
//! - **Validation**: Timer consistency correction
//! - **Defaults**: Embedded baseline profiles
//! - **Config**: Engine limits and tier count
//! - **Error**: Shared error types

pub mod config;
pub mod defaults;
pub mod error;
pub mod profile;
pub mod taxonomy;
pub mod validation;

// Re-export main types for convenience
pub use config::EngineConfig;
pub use defaults::{is_default_profile, DefaultProfile, DEFAULT_PROFILE};
pub use error::{Error, Result};
pub use profile::{TransmitProfile, TransmitRule, TIMER_DISABLED};
pub use taxonomy::{DeviceState, NetworkCost, PowerSource};
pub use validation::adjust_timers;

/// Configuration directory name (under XDG_CONFIG_HOME).
pub const CONFIG_DIR_NAME: &str = "transmit-profiles";
