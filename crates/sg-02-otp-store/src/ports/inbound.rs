//! # Inbound Ports (Driving Ports / API)

use crate::domain::code::OtpCode;
use crate::domain::errors::OtpError;
use crate::domain::store::OtpCheck;
use shared_types::{Identity, PhoneNumber, Timestamp};

/// Primary OTP Store API.
pub trait OtpStoreApi: Send + Sync {
    /// Issue a fresh code for `identity`, replacing any previous record.
    ///
    /// # Errors
    /// * `OtpError::PhoneAlreadyBound` - another identity holds a live record for `phone`
    fn issue(&self, identity: &Identity, phone: &PhoneNumber) -> Result<OtpCode, OtpError>;

    /// Check a submitted code and report why it failed.
    ///
    /// A match consumes the record; expiry deletes it; a mismatch keeps it.
    fn check(&self, identity: &Identity, submitted: &str) -> OtpCheck;

    /// `true` only for an exact match against a live record.
    fn verify(&self, identity: &Identity, submitted: &str) -> bool {
        self.check(identity, submitted) == OtpCheck::Accepted
    }

    /// Discard the record for `identity` if it still holds `code`.
    fn revoke(&self, identity: &Identity, code: &OtpCode) -> bool;

    /// Discard whatever record `identity` holds.
    fn discard(&self, identity: &Identity) -> bool;

    /// Delete every record that expired before `now`. Returns records removed.
    fn sweep(&self, now: Timestamp) -> usize;
}
