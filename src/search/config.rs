//! Index configuration
//!
//! Timeouts and paging knobs for the autocomplete index.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Autocomplete index configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Bound on every store call in milliseconds (default: 2000)
    #[serde(default = "default_op_timeout_ms")]
    pub op_timeout_ms: u64,

    /// Raw members fetched per wanted product (default: 3)
    #[serde(default = "default_over_fetch_factor")]
    pub over_fetch_factor: usize,

    /// Suggestions returned when the caller gives no limit (default: 10)
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Upper clamp for caller-supplied limits (default: 50)
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

fn default_op_timeout_ms() -> u64 {
    2000
}

fn default_over_fetch_factor() -> usize {
    3
}

fn default_limit() -> usize {
    10
}

fn default_max_limit() -> usize {
    50
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            op_timeout_ms: default_op_timeout_ms(),
            over_fetch_factor: default_over_fetch_factor(),
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

impl IndexConfig {
    pub fn op_timeout(&self) -> Duration {
        Duration::from_millis(self.op_timeout_ms)
    }

    /// Create a config with a custom store timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            op_timeout_ms: timeout.as_millis() as u64,
            ..Default::default()
        }
    }
}
