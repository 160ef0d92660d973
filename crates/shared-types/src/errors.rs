//! # Error Types
//!
//! Validation errors for the shared entities.

use thiserror::Error;

/// An identity handle was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// Identity string is empty.
    #[error("identity must not be empty")]
    Empty,

    /// Identity contains a character that cannot appear in a claim value.
    #[error("identity contains reserved character {0:?}")]
    ReservedCharacter(char),
}

/// A phone number failed format validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhoneError {
    /// Missing the leading `+` of the international format.
    #[error("phone number must start with '+'")]
    MissingPlus,

    /// A non-digit character follows the `+`.
    #[error("phone number must contain only digits after '+'")]
    NonDigit,

    /// The first digit is zero (no country code starts with 0).
    #[error("phone number country code must not start with 0")]
    LeadingZero,

    /// Wrong number of digits.
    #[error("phone number must have 7-15 digits, got {0}")]
    InvalidLength(usize),
}
