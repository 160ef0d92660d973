//! # Launch Token Errors

use thiserror::Error;

/// Errors raised while setting up the signer. Verification itself never
/// errors; see [`TokenVerdict`](crate::domain::verdict::TokenVerdict).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    /// The deploy token is empty.
    #[error("deploy token must not be empty")]
    EmptyDeployToken,

    /// The HMAC implementation refused the key material.
    #[error("invalid HMAC key: {0}")]
    InvalidKey(String),
}
