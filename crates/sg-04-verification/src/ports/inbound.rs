//! # Inbound Ports (Driving Ports / API)
//!
//! The operations the conversational layer calls.

use crate::domain::errors::VerificationError;
use crate::domain::session::SessionState;
use crate::domain::transfer::{TransferIntent, TransferKind, TransferState};
use async_trait::async_trait;
use sg_03_launch_token::TokenVerdict;
use shared_types::{Identity, PhoneNumber, Timestamp};

/// Records removed by one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub otps_removed: usize,
    pub rate_limits_removed: usize,
}

#[async_trait]
pub trait VerificationApi: Send + Sync {
    /// Start verifying `raw_phone` for `identity` and deliver a code.
    ///
    /// Returns the phone the code was sent to.
    ///
    /// # Errors
    /// * `AlreadyVerified` - session is already verified
    /// * `RateLimited` - `otp_request` limit reached
    /// * `InvalidFormat` - phone is not in international format
    /// * `PhoneConflict` - phone bound to another identity's live code
    /// * `DeliveryFailed` - SMS could not be sent; session back to unverified
    async fn request_verification(
        &self,
        identity: &Identity,
        raw_phone: &str,
    ) -> Result<PhoneNumber, VerificationError>;

    /// Submit a code. On success the session becomes `Verified`.
    ///
    /// # Errors
    /// * `NotAwaitingOtp` / `AlreadyVerified` - wrong state
    /// * `RateLimited` - `otp_verify` limit reached
    /// * `InvalidFormat` - not exactly six digits
    /// * `Mismatch` - wrong code, with attempts remaining
    /// * `Expired` - no live code; request a new one
    fn submit_otp(&self, identity: &Identity, code: &str) -> Result<PhoneNumber, VerificationError>;

    fn is_verified(&self, identity: &Identity) -> bool;

    fn session_state(&self, identity: &Identity) -> SessionState;

    /// Signed token for `identity`. Verification state is not consulted, so
    /// the mini-app can also serve as the verification entry point.
    fn mint_launch_token(&self, identity: &Identity) -> String;

    /// `<webapp_url>?<token>`.
    fn mint_launch_url(&self, identity: &Identity) -> String;

    fn verify_launch_token(&self, raw: &str, identity: &Identity) -> TokenVerdict;

    /// Returns `true` if anything was cancelled.
    fn cancel(&self, identity: &Identity) -> bool;

    fn begin_transfer(
        &self,
        identity: &Identity,
        kind: TransferKind,
    ) -> Result<TransferState, VerificationError>;

    fn submit_transfer_input(
        &self,
        identity: &Identity,
        input: &str,
    ) -> Result<TransferState, VerificationError>;

    fn confirm_transfer(&self, identity: &Identity) -> Result<TransferIntent, VerificationError>;

    /// Drop expired codes and idle rate-limit records.
    fn sweep(&self, now: Timestamp) -> SweepReport;
}
