//! # OTP Errors

use thiserror::Error;

/// Errors that can occur while issuing or parsing passcodes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OtpError {
    /// The phone is bound to a different identity's unexpired record.
    #[error("phone number is already bound to another identity")]
    PhoneAlreadyBound,

    /// Submitted code is not exactly six ASCII digits.
    #[error("verification code must be exactly 6 digits")]
    InvalidFormat,
}
