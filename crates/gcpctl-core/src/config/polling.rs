//! Polling configuration for long-running operations
//!
//! Stored per profile; converted into [`crate::PollSettings`] before a wait
//! starts. Command-line flags may override individual fields.

use serde::{Deserialize, Serialize};

/// Capped exponential backoff used while waiting on an operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Delay before the first status check, in milliseconds
    #[serde(default = "default_initial_interval_ms")]
    pub initial_interval_ms: u64,

    /// Upper bound for the delay between checks, in milliseconds
    #[serde(default = "default_max_interval_ms")]
    pub max_interval_ms: u64,

    /// Growth factor applied to the delay after every check
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,

    /// Give up waiting after this many seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Consecutive transient polling failures tolerated before giving up
    #[serde(default = "default_max_transient_retries")]
    pub max_transient_retries: u32,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            initial_interval_ms: default_initial_interval_ms(),
            max_interval_ms: default_max_interval_ms(),
            multiplier: default_multiplier(),
            timeout_secs: default_timeout_secs(),
            max_transient_retries: default_max_transient_retries(),
        }
    }
}

// Default value functions for serde
fn default_initial_interval_ms() -> u64 {
    1000
}

fn default_max_interval_ms() -> u64 {
    10_000
}

fn default_multiplier() -> f64 {
    1.5
}

fn default_timeout_secs() -> u64 {
    1800
}

fn default_max_transient_retries() -> u32 {
    3
}
