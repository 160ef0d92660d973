//! Rate limit configuration.

use std::collections::HashMap;

/// Action name for requesting a verification code.
pub const OTP_REQUEST: &str = "otp_request";

/// Action name for submitting a verification code.
pub const OTP_VERIFY: &str = "otp_verify";

/// Records idle for longer than this are dropped by the sweep (1 hour).
pub const DEFAULT_IDLE_TTL_SECS: u64 = 3600;

/// Ceiling for one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionLimit {
    /// Maximum allowed attempts per window.
    pub limit: u32,
    /// Window length in seconds.
    pub window_secs: u64,
}

impl ActionLimit {
    pub const fn new(limit: u32, window_secs: u64) -> Self {
        Self { limit, window_secs }
    }
}

/// Per-action limits plus the idle eviction horizon.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    limits: HashMap<String, ActionLimit>,
    /// Sweep drops records with no attempt for longer than this.
    pub idle_ttl_secs: u64,
}

impl RateLimitConfig {
    /// Empty table: every action is unlimited.
    pub fn empty() -> Self {
        Self {
            limits: HashMap::new(),
            idle_ttl_secs: DEFAULT_IDLE_TTL_SECS,
        }
    }

    /// Builder-style setter for one action.
    pub fn with_limit(mut self, action: impl Into<String>, limit: ActionLimit) -> Self {
        self.limits.insert(action.into(), limit);
        self
    }

    pub fn with_idle_ttl(mut self, secs: u64) -> Self {
        self.idle_ttl_secs = secs;
        self
    }

    /// Limit for `action`, or `None` when the action is unconfigured.
    pub fn limit_for(&self, action: &str) -> Option<ActionLimit> {
        self.limits.get(action).copied()
    }
}

impl Default for RateLimitConfig {
    /// `otp_request`: 3 per 5 minutes, `otp_verify`: 5 per 5 minutes.
    fn default() -> Self {
        Self::empty()
            .with_limit(OTP_REQUEST, ActionLimit::new(3, 300))
            .with_limit(OTP_VERIFY, ActionLimit::new(5, 300))
    }
}
