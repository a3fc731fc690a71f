//! Trigger runner configuration.

use serde::{Deserialize, Serialize};

/// Settings for the background runner that reacts to document changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// Whether the runner is started at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Maximum number of events handled concurrently.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    /// Upper bound for a single handler invocation, in seconds.
    #[serde(default = "default_handler_timeout")]
    pub handler_timeout_seconds: u64,
    /// How long shutdown waits for in-flight events, in seconds.
    #[serde(default = "default_drain_timeout")]
    pub drain_timeout_seconds: u64,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_concurrency: default_max_concurrency(),
            handler_timeout_seconds: default_handler_timeout(),
            drain_timeout_seconds: default_drain_timeout(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_max_concurrency() -> usize {
    16
}

fn default_handler_timeout() -> u64 {
    30
}

fn default_drain_timeout() -> u64 {
    10
}
