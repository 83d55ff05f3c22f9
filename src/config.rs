//! Realm configuration
//!
//! Loaded from JSON (file or string) or built in code:
//!
//! ```json
//! {
//!   "throttle": { "ticks_per_second": 1000.0, "burst": 64, "max_ticks": 100000 },
//!   "max_fetch_entries": 65536
//! }
//! ```

use crate::error::{Error, Result};
use crate::runtime::{ExecutionThrottle, TokenBucket, Unthrottled};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Default cap on array-like lengths read by built-ins
pub const DEFAULT_MAX_FETCH_ENTRIES: usize = 1 << 24;

/// Configuration of a [`Realm`](crate::runtime::Realm)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RealmConfig {
    /// Rate limit for host-visible loops; unthrottled when absent
    pub throttle: Option<ThrottleConfig>,
    /// Largest array-like length `fromEntries` and friends will read
    pub max_fetch_entries: usize,
}

impl Default for RealmConfig {
    fn default() -> Self {
        Self {
            throttle: None,
            max_fetch_entries: DEFAULT_MAX_FETCH_ENTRIES,
        }
    }
}

/// Token-bucket settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThrottleConfig {
    /// Sustained rate
    pub ticks_per_second: f64,
    /// Bucket size
    #[serde(default = "default_burst")]
    pub burst: u32,
    /// Total ticks allowed over the realm's lifetime
    #[serde(default)]
    pub max_ticks: Option<u64>,
}

fn default_burst() -> u32 {
    1
}

impl RealmConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(source: &str) -> Result<Self> {
        let config: RealmConfig =
            serde_json::from_str(source).map_err(|e| Error::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading realm config");
        Self::from_json_str(&source)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.max_fetch_entries == 0 {
            return Err(Error::ConfigError(
                "max_fetch_entries must be positive".to_string(),
            ));
        }
        if let Some(throttle) = &self.throttle {
            if !(throttle.ticks_per_second.is_finite() && throttle.ticks_per_second > 0.0) {
                return Err(Error::ConfigError(format!(
                    "ticks_per_second must be a positive number, got {}",
                    throttle.ticks_per_second
                )));
            }
            if throttle.burst == 0 {
                return Err(Error::ConfigError("burst must be at least 1".to_string()));
            }
        }
        Ok(())
    }

    /// Builder: set the throttle
    pub fn with_throttle(mut self, throttle: ThrottleConfig) -> Self {
        self.throttle = Some(throttle);
        self
    }

    /// Builder: set the array-like length cap
    pub fn with_max_fetch_entries(mut self, max: usize) -> Self {
        self.max_fetch_entries = max;
        self
    }

    /// Instantiate the configured throttle
    pub(crate) fn build_throttle(&self) -> Arc<dyn ExecutionThrottle> {
        match &self.throttle {
            Some(t) => Arc::new(TokenBucket::new(t.ticks_per_second, t.burst, t.max_ticks)),
            None => Arc::new(Unthrottled),
        }
    }
}
