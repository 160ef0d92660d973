//! # Rate Limiter Service
//!
//! Implements `RateLimiterApi` over a `RateLimitTable`.
//!
//! ## Locking
//!
//! One mutex guards the whole table. Every operation is a handful of map
//! lookups, so contention across identities stays low and the same lock
//! serializes attempts for a single identity.

use crate::domain::config::RateLimitConfig;
use crate::domain::window::RateLimitTable;
use crate::ports::inbound::RateLimiterApi;
use parking_lot::Mutex;
use shared_types::{Identity, TimeSource, Timestamp};
use tracing::{debug, warn};

pub struct RateLimiterService<T: TimeSource> {
    config: RateLimitConfig,
    table: Mutex<RateLimitTable>,
    clock: T,
}

impl<T: TimeSource> RateLimiterService<T> {
    pub fn new(config: RateLimitConfig, clock: T) -> Self {
        Self {
            config,
            table: Mutex::new(RateLimitTable::new()),
            clock,
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Number of identities currently tracked.
    pub fn tracked_identities(&self) -> usize {
        self.table.lock().len()
    }
}

impl<T: TimeSource> RateLimiterApi for RateLimiterService<T> {
    fn check_and_consume(&self, identity: &Identity, action: &str) -> bool {
        let now = self.clock.now();
        let allowed = self
            .table
            .lock()
            .check_and_consume(&self.config, identity, action, now);
        if !allowed {
            warn!(identity = %identity, action, "Rate limit exceeded");
        }
        allowed
    }

    fn remaining(&self, identity: &Identity, action: &str) -> Option<u32> {
        let now = self.clock.now();
        self.table
            .lock()
            .remaining(&self.config, identity, action, now)
    }

    fn sweep(&self, now: Timestamp) -> usize {
        let removed = self.table.lock().sweep(&self.config, now);
        debug!(removed, "Swept idle rate limit records");
        removed
    }
}
