//! Launch token configuration.

/// Maximum token age in seconds (5 minutes).
pub const DEFAULT_FRESHNESS_SECS: u64 = 300;

/// Tolerated clock skew for tokens dated in the future.
pub const DEFAULT_FUTURE_SKEW_SECS: u64 = 10;

/// Hex characters kept from the session HMAC.
pub const DEFAULT_SESSION_PREFIX_LEN: usize = 16;

/// Value of the `start_param` claim.
pub const DEFAULT_PURPOSE_TAG: &str = "authentication";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenConfig {
    pub freshness_secs: u64,
    pub future_skew_secs: u64,
    pub session_prefix_len: usize,
    pub purpose_tag: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            freshness_secs: DEFAULT_FRESHNESS_SECS,
            future_skew_secs: DEFAULT_FUTURE_SKEW_SECS,
            session_prefix_len: DEFAULT_SESSION_PREFIX_LEN,
            purpose_tag: DEFAULT_PURPOSE_TAG.to_string(),
        }
    }
}
