//! Error types for the Mach re-simulation engine.
//!
//! The replay core is total over its input domain, so the only errors
//! defined here are configuration errors detected at construction time.

use std::error::Error;
use std::fmt;

/// Errors detected while validating engine configuration.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `ticks_per_second` is NaN, infinite, zero, or negative.
    InvalidTickRate {
        /// The invalid value.
        value: f64,
    },
    /// `max_replay_ticks` is zero, which would refuse every replay.
    ZeroReplayBudget,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTickRate { value } => {
                write!(f, "ticks_per_second must be finite and positive, got {value}")
            }
            Self::ZeroReplayBudget => write!(f, "max_replay_ticks must be at least 1"),
        }
    }
}

impl Error for ConfigError {}
