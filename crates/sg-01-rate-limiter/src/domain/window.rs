//! # Fixed-Window Table
//!
//! ## Algorithm
//!
//! For each `(identity, action)`:
//! - Records whose window has elapsed (`now - window_start >= window`) are
//!   pruned before counting
//! - `count >= limit` denies without touching the record
//! - Otherwise `count += 1`, opening the window on the first hit

use crate::domain::config::RateLimitConfig;
use shared_types::{Identity, Timestamp};
use std::collections::HashMap;

/// Counter for one `(identity, action)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowRecord {
    /// Allowed attempts in the current window.
    pub count: u32,
    /// When the current window opened.
    pub window_start: Timestamp,
    /// Most recent allowed attempt (drives idle eviction).
    pub last_attempt: Timestamp,
}

/// All windows for all identities.
#[derive(Debug, Default)]
pub struct RateLimitTable {
    records: HashMap<Identity, HashMap<String, WindowRecord>>,
}

impl RateLimitTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one attempt if the ceiling allows it.
    ///
    /// Returns `true` if the attempt is allowed.
    pub fn check_and_consume(
        &mut self,
        config: &RateLimitConfig,
        identity: &Identity,
        action: &str,
        now: Timestamp,
    ) -> bool {
        let Some(limit) = config.limit_for(action) else {
            return true;
        };

        self.prune_identity(config, identity, now);

        let current = self
            .records
            .get(identity)
            .and_then(|actions| actions.get(action))
            .map(|record| record.count)
            .unwrap_or(0);
        if current >= limit.limit {
            return false;
        }

        let record = self
            .records
            .entry(identity.clone())
            .or_default()
            .entry(action.to_string())
            .or_insert(WindowRecord {
                count: 0,
                window_start: now,
                last_attempt: now,
            });
        record.count += 1;
        record.last_attempt = now;
        true
    }

    /// Attempts left in the current window, `None` for unlimited actions.
    pub fn remaining(
        &self,
        config: &RateLimitConfig,
        identity: &Identity,
        action: &str,
        now: Timestamp,
    ) -> Option<u32> {
        let limit = config.limit_for(action)?;
        let used = self
            .records
            .get(identity)
            .and_then(|actions| actions.get(action))
            .filter(|record| now.saturating_sub(record.window_start) < limit.window_secs)
            .map(|record| record.count)
            .unwrap_or(0);
        Some(limit.limit.saturating_sub(used))
    }

    /// Drop stale records. Returns the number of `(identity, action)`
    /// records removed; identities left without records go too.
    ///
    /// A record is stale once its window has elapsed and it has seen no
    /// attempt for longer than `idle_ttl_secs`.
    pub fn sweep(&mut self, config: &RateLimitConfig, now: Timestamp) -> usize {
        let mut removed = 0;
        self.records.retain(|_, actions| {
            let before = actions.len();
            actions.retain(|action, record| {
                let window = config.limit_for(action).map(|l| l.window_secs).unwrap_or(0);
                let idle = now.saturating_sub(record.last_attempt);
                let elapsed = now.saturating_sub(record.window_start);
                !(idle > config.idle_ttl_secs && elapsed >= window)
            });
            removed += before - actions.len();
            !actions.is_empty()
        });
        removed
    }

    /// Record for `(identity, action)`, if any.
    pub fn record(&self, identity: &Identity, action: &str) -> Option<&WindowRecord> {
        self.records.get(identity).and_then(|actions| actions.get(action))
    }

    /// Number of identities with at least one record.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn prune_identity(&mut self, config: &RateLimitConfig, identity: &Identity, now: Timestamp) {
        let Some(actions) = self.records.get_mut(identity) else {
            return;
        };
        actions.retain(|action, record| match config.limit_for(action) {
            Some(limit) => now.saturating_sub(record.window_start) < limit.window_secs,
            None => false,
        });
        if actions.is_empty() {
            self.records.remove(identity);
        }
    }
}
