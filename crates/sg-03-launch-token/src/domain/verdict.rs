//! # Verification Verdict

use thiserror::Error;

/// Why a launch token was rejected.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Hash)]
pub enum TokenRejection {
    /// Unparseable, or a required claim is absent.
    #[error("token is malformed or missing a required claim")]
    Malformed,

    /// `user` differs from the verifying context's identity.
    #[error("token was issued for a different identity")]
    IdentityMismatch,

    /// `session` does not match the value derived from `user`.
    #[error("session claim does not match identity")]
    SessionMismatch,

    /// `auth_date` is outside the freshness window.
    #[error("token is stale")]
    Stale,

    /// `hash` does not match the recomputed signature.
    #[error("token signature is invalid")]
    SignatureInvalid,
}

impl TokenRejection {
    /// Short label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Malformed => "malformed",
            Self::IdentityMismatch => "identity_mismatch",
            Self::SessionMismatch => "session_mismatch",
            Self::Stale => "stale",
            Self::SignatureInvalid => "signature_invalid",
        }
    }
}

/// Boolean outcome plus a reason code for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenVerdict {
    pub valid: bool,
    pub reason: Option<TokenRejection>,
}

impl TokenVerdict {
    pub fn accepted() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    pub fn rejected(reason: TokenRejection) -> Self {
        Self {
            valid: false,
            reason: Some(reason),
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

impl From<Result<(), TokenRejection>> for TokenVerdict {
    fn from(result: Result<(), TokenRejection>) -> Self {
        match result {
            Ok(()) => Self::accepted(),
            Err(reason) => Self::rejected(reason),
        }
    }
}
