//! Digit Source Adapters

use crate::ports::outbound::{DigitSource, EntropyError};
use parking_lot::Mutex;
use rand::rngs::OsRng;
use rand::RngCore;

/// Largest multiple of 10 that fits in a byte; bytes at or above it are
/// rejected so every digit is equally likely.
const REJECTION_BOUND: u8 = 250;

/// Bytes drawn per OS call before giving up on rejection sampling.
const SAMPLE_BATCH: usize = 16;

/// Production digit source backed by the operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsDigitSource;

impl DigitSource for OsDigitSource {
    fn secure_digit(&self) -> Result<u8, EntropyError> {
        let mut buf = [0u8; SAMPLE_BATCH];
        OsRng
            .try_fill_bytes(&mut buf)
            .map_err(|e| EntropyError(e.to_string()))?;

        buf.iter()
            .find(|b| **b < REJECTION_BOUND)
            .map(|b| b % 10)
            .ok_or_else(|| EntropyError("rejection sampling exhausted".to_string()))
    }
}

/// Deterministic digit source for tests.
///
/// Cycles through the given digits.
#[derive(Debug)]
pub struct SequenceDigitSource {
    digits: Vec<u8>,
    cursor: Mutex<usize>,
}

impl SequenceDigitSource {
    pub fn new(digits: Vec<u8>) -> Self {
        Self {
            digits,
            cursor: Mutex::new(0),
        }
    }

    /// Source that yields the digits of `code` in order, e.g. `"123456"`.
    pub fn from_code(code: &str) -> Self {
        Self::new(
            code.bytes()
                .filter(u8::is_ascii_digit)
                .map(|b| b - b'0')
                .collect(),
        )
    }
}

impl DigitSource for SequenceDigitSource {
    fn secure_digit(&self) -> Result<u8, EntropyError> {
        if self.digits.is_empty() {
            return Err(EntropyError("empty digit sequence".to_string()));
        }
        let mut cursor = self.cursor.lock();
        let digit = self.digits[*cursor % self.digits.len()];
        *cursor += 1;
        Ok(digit)
    }
}

/// Source that always fails, for exercising the fallback path.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingDigitSource;

impl DigitSource for FailingDigitSource {
    fn secure_digit(&self) -> Result<u8, EntropyError> {
        Err(EntropyError("entropy source offline".to_string()))
    }
}
