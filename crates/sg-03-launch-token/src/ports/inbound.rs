//! # Inbound Ports (Driving Ports / API)

use crate::domain::verdict::TokenVerdict;
use shared_types::Identity;

/// Primary Launch Token API.
pub trait LaunchTokenApi: Send + Sync {
    /// Signed query-string token for `identity`, dated now.
    fn mint(&self, identity: &Identity) -> String;

    /// Check `raw` (bare token or full URL) against `expected`.
    ///
    /// Never errors; every failure is a rejected verdict with a reason.
    fn verify(&self, raw: &str, expected: &Identity) -> TokenVerdict;
}
