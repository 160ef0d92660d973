//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of this subsystem.

use shared_types::{Identity, Timestamp};

/// Primary Rate Limiter API.
///
/// Implementations must be thread-safe (`Send + Sync`) and must serialize
/// updates for the same identity.
pub trait RateLimiterApi: Send + Sync {
    /// Count one attempt of `action` by `identity`.
    ///
    /// Returns `true` if the attempt is allowed. Unknown actions are always allowed.
    fn check_and_consume(&self, identity: &Identity, action: &str) -> bool;

    /// Attempts left in the current window, `None` for unlimited actions.
    fn remaining(&self, identity: &Identity, action: &str) -> Option<u32>;

    /// Drop stale records as of `now`. Returns `(identity, action)` records removed.
    fn sweep(&self, now: Timestamp) -> usize;
}
