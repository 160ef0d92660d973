//! # Sessions

use crate::domain::transfer::TransferState;
use shared_types::PhoneNumber;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unverified,
    /// A code was sent to `phone` and not yet accepted.
    AwaitingOtp { phone: PhoneNumber },
    /// Terminal. No revocation path exists.
    Verified { phone: PhoneNumber },
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unverified => "unverified",
            Self::AwaitingOtp { .. } => "awaiting_otp",
            Self::Verified { .. } => "verified",
        }
    }
}

/// Per-identity conversational state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub state: SessionState,
    /// Only leaves `Idle` while `state` is `Verified`.
    pub transfer: TransferState,
}

impl Session {
    pub fn is_verified(&self) -> bool {
        matches!(self.state, SessionState::Verified { .. })
    }

    /// Nothing in flight; the session can be dropped from the map.
    pub fn is_resting(&self) -> bool {
        self.state == SessionState::Unverified && self.transfer.is_idle()
    }
}
