//! # Passcodes
//!
//! A code is exactly [`OTP_LENGTH`] ASCII digits and is always compared as a
//! string, so leading zeros are significant.

use crate::domain::errors::OtpError;
use crate::ports::outbound::DigitSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use subtle::ConstantTimeEq;
use tracing::warn;

/// Number of digits in a passcode.
pub const OTP_LENGTH: usize = 6;

/// A six-digit one-time passcode.
///
/// `Debug` is redacted; use [`OtpCode::as_str`] to place the code in an SMS body.
#[derive(Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// Validate the shape of a submitted code.
    pub fn parse(raw: &str) -> Result<Self, OtpError> {
        if raw.len() != OTP_LENGTH || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(OtpError::InvalidFormat);
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Constant-time comparison against a submitted string.
    pub fn matches(&self, submitted: &str) -> bool {
        self.0.as_bytes().ct_eq(submitted.as_bytes()).into()
    }
}

impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OtpCode(******)")
    }
}

/// Generate a code from `source`.
///
/// If the secure source fails, the remaining digits come from a time-seeded
/// `StdRng` and a warning is logged. That generator is predictable to anyone
/// who can estimate the seed.
pub fn generate_code(source: &dyn DigitSource) -> OtpCode {
    let mut code = String::with_capacity(OTP_LENGTH);
    let mut fallback: Option<StdRng> = None;

    for _ in 0..OTP_LENGTH {
        if fallback.is_none() {
            match source.secure_digit() {
                Ok(d) => {
                    code.push(char::from(b'0' + d % 10));
                    continue;
                }
                Err(e) => {
                    warn!(error = %e, "Using fallback random for OTP generation");
                    fallback = Some(StdRng::seed_from_u64(time_seed()));
                }
            }
        }
        if let Some(rng) = fallback.as_mut() {
            code.push(char::from(b'0' + rng.gen_range(0..10u8)));
        }
    }

    OtpCode(code)
}

fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}
