//! # Verification Errors
//!
//! Every public operation reports failure through [`VerificationError`];
//! nothing here is fatal to the process.

use crate::domain::transfer::TransferError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerificationError {
    /// The rate limiter denied the attempt.
    #[error("too many attempts, please wait a few minutes")]
    RateLimited,

    /// Phone or code did not have the required shape.
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// The phone is bound to another identity's live code.
    #[error("phone number is already being verified by another account")]
    PhoneConflict,

    /// No live code for this identity; request a new one.
    #[error("verification code expired, request a new one")]
    Expired,

    /// Wrong code; the record is kept for another try.
    #[error("invalid verification code, {remaining_attempts} attempts remaining")]
    Mismatch { remaining_attempts: u32 },

    /// SMS delivery failed; the session is back to unverified.
    #[error("failed to send verification code: {0}")]
    DeliveryFailed(String),

    #[error("no verification in progress")]
    NotAwaitingOtp,

    #[error("already verified")]
    AlreadyVerified,

    #[error("phone verification required")]
    NotVerified,

    #[error("transfer: {0}")]
    TransferInput(#[from] TransferError),
}

impl VerificationError {
    /// Short label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RateLimited => "rate_limited",
            Self::InvalidFormat(_) => "invalid_format",
            Self::PhoneConflict => "phone_conflict",
            Self::Expired => "expired",
            Self::Mismatch { .. } => "mismatch",
            Self::DeliveryFailed(_) => "delivery_failed",
            Self::NotAwaitingOtp => "not_awaiting_otp",
            Self::AlreadyVerified => "already_verified",
            Self::NotVerified => "not_verified",
            Self::TransferInput(_) => "transfer_input",
        }
    }
}
