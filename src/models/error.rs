// Transmit Profiles - Error Types
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Error types for configuration decoding and engine setup.
//!
//! Profile operations never surface these to callers: a failed load
//! collapses to "zero profiles decoded" and a log line. They exist so the
//! parser can report exactly why a payload was refused.

use thiserror::Error;

/// Result type alias for transmit profile operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for transmit profile operations.
#[derive(Debug, Error)]
pub enum Error {
    // ========================================
    // Payload Errors
    // ========================================
    #[error("Configuration syntax error: {0}")]
    ConfigSyntax(String),

    #[error("Exceeded max transmit profiles: {count} > {max}")]
    ProfileCountExceeded { count: usize, max: usize },

    #[error("Exceeded max transmit rules for profile {profile}: {count} > {max}")]
    RuleCountExceeded {
        profile: String,
        count: usize,
        max: usize,
    },

    #[error("Profile has no usable rules: {0}")]
    EmptyProfile(String),

    #[error("Rule {rule} of profile {profile} has {count} timers, expected at least {min}")]
    InvalidTimers {
        profile: String,
        rule: usize,
        count: usize,
        min: usize,
    },

    #[error("Rule {rule} of profile {profile} has out-of-range timer value {value}")]
    TimerOutOfRange {
        profile: String,
        rule: usize,
        value: String,
    },

    // ========================================
    // State Errors
    // ========================================
    #[error("Active profile is not loaded: {0}")]
    UnusableState(String),

    // ========================================
    // Engine Configuration Errors
    // ========================================
    #[error("Failed to read configuration: {0}")]
    ConfigReadFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParseFailed(String),
}

impl Error {
    /// Check if this error comes from one of the hard payload limits.
    pub fn is_limit_exceeded(&self) -> bool {
        matches!(
            self,
            Self::ProfileCountExceeded { .. } | Self::RuleCountExceeded { .. }
        )
    }

    /// Check if this error describes a malformed payload.
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigSyntax(_)
                | Self::EmptyProfile(_)
                | Self::InvalidTimers { .. }
                | Self::TimerOutOfRange { .. }
        )
    }
}

// Payload decoding goes through serde_json
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigSyntax(err.to_string())
    }
}

// Engine configuration is TOML
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigParseFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let err = Error::ProfileCountExceeded { count: 21, max: 20 };
        assert!(err.is_limit_exceeded());
        assert!(!err.is_syntax_error());

        let err = Error::ConfigSyntax("expected array".to_string());
        assert!(err.is_syntax_error());
        assert!(!err.is_limit_exceeded());
    }

    #[test]
    fn test_json_error_is_syntax() {
        let json_err = serde_json::from_str::<serde_json::Value>("[{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::ConfigSyntax(_)));
    }

    #[test]
    fn test_error_display() {
        let err = Error::RuleCountExceeded {
            profile: "CUSTOM".to_string(),
            count: 17,
            max: 16,
        };
        assert_eq!(
            err.to_string(),
            "Exceeded max transmit rules for profile CUSTOM: 17 > 16"
        );
    }
}
