//! # Deploy Token
//!
//! The process-wide secret behind every launch token. It is zeroized on drop
//! and never printed.

use crate::domain::errors::TokenError;
use zeroize::{Zeroize, ZeroizeOnDrop};

#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DeployToken {
    inner: String,
}

impl DeployToken {
    pub fn new(raw: impl Into<String>) -> Result<Self, TokenError> {
        let inner = raw.into();
        if inner.is_empty() {
            return Err(TokenError::EmptyDeployToken);
        }
        Ok(Self { inner })
    }

    /// Raw secret bytes. Use for key derivation only.
    pub fn expose(&self) -> &[u8] {
        self.inner.as_bytes()
    }
}

impl std::fmt::Debug for DeployToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the actual secret
        f.write_str("DeployToken(***)")
    }
}
