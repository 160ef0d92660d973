//! # Outbound Ports (Driven Ports / SPI)

use thiserror::Error;

/// The secure randomness source could not produce a value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("secure randomness unavailable: {0}")]
pub struct EntropyError(pub String);

/// Source of decimal digits for passcode generation.
///
/// Production implementations must be backed by a CSPRNG.
pub trait DigitSource: Send + Sync {
    /// Returns a uniformly distributed digit in `0..=9`.
    fn secure_digit(&self) -> Result<u8, EntropyError>;
}
