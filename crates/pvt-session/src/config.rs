//! Session configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for an editing session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Quiet period before a save fires, in milliseconds
    pub save_debounce_ms: u64,
    /// Maximum cached example entries
    pub example_cache_capacity: u64,
    /// Lifetime of a cached example, in seconds
    pub example_cache_ttl_secs: u64,
    /// Insert the built-in verb table for users with no rows
    pub seed_new_users: bool,
    /// Maximum undrained notices kept
    pub notice_capacity: usize,
}

impl SessionConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With save quiet period
    #[inline]
    #[must_use]
    pub fn with_save_debounce(mut self, delay: Duration) -> Self {
        self.save_debounce_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// With seeding switched on or off
    #[inline]
    #[must_use]
    pub fn with_seed_new_users(mut self, seed: bool) -> Self {
        self.seed_new_users = seed;
        self
    }

    /// With example cache bounds
    #[inline]
    #[must_use]
    pub fn with_example_cache(mut self, capacity: u64, ttl: Duration) -> Self {
        self.example_cache_capacity = capacity;
        self.example_cache_ttl_secs = ttl.as_secs();
        self
    }

    /// Save quiet period
    #[inline]
    #[must_use]
    pub fn save_debounce(&self) -> Duration {
        Duration::from_millis(self.save_debounce_ms)
    }

    /// Example cache lifetime
    #[inline]
    #[must_use]
    pub fn example_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.example_cache_ttl_secs)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            save_debounce_ms: 1000,
            example_cache_capacity: 512,
            example_cache_ttl_secs: 3600,
            seed_new_users: true,
            notice_capacity: 64,
        }
    }
}
