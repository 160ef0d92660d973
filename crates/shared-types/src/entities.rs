//! # Core Domain Entities
//!
//! - **Identity**: opaque handle for a conversation participant
//! - **PhoneNumber**: validated international phone number
//! - **Timestamp**: Unix seconds

use crate::errors::{IdentityError, PhoneError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Characters that would break the flat `key=value&key=value` claim encoding.
const RESERVED_IDENTITY_CHARS: [char; 4] = ['&', '=', '?', '#'];

/// Stable handle for a user, supplied by the conversational layer.
///
/// Most callers construct it from a numeric chat id via `From<i64>`/`From<u64>`.
/// String handles go through [`Identity::new`], which rejects anything that
/// could not be embedded verbatim as a launch-token claim value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity(String);

impl Identity {
    pub fn new(raw: impl Into<String>) -> Result<Self, IdentityError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(IdentityError::Empty);
        }
        if let Some(c) = raw
            .chars()
            .find(|c| RESERVED_IDENTITY_CHARS.contains(c) || c.is_whitespace() || c.is_control())
        {
            return Err(IdentityError::ReservedCharacter(c));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for Identity {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<i64> for Identity {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl TryFrom<String> for Identity {
    type Error = IdentityError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<Identity> for String {
    fn from(identity: Identity) -> Self {
        identity.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Minimum digits in an international number (excluding `+`).
pub const MIN_PHONE_DIGITS: usize = 7;

/// Maximum digits in an international number (E.164).
pub const MAX_PHONE_DIGITS: usize = 15;

/// A phone number in international format: `+`, then 7-15 digits, first digit 1-9.
///
/// `Display` and `Debug` both render the masked form.
/// Use [`PhoneNumber::as_str`] only where the full number is required
/// (SMS delivery, conflict checks).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parse and validate a phone number. Surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Result<Self, PhoneError> {
        let trimmed = raw.trim();
        let digits = trimmed.strip_prefix('+').ok_or(PhoneError::MissingPlus)?;

        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(PhoneError::NonDigit);
        }
        if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits.len()) {
            return Err(PhoneError::InvalidLength(digits.len()));
        }
        if digits.starts_with('0') {
            return Err(PhoneError::LeadingZero);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Masked form suitable for logs and user-facing messages.
    pub fn masked(&self) -> String {
        mask_phone(&self.0)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl fmt::Debug for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PhoneNumber").field(&self.masked()).finish()
    }
}

/// Hide the middle of a phone number, keeping the first and last three characters.
///
/// Inputs of six characters or fewer are returned unchanged.
pub fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= 6 {
        return phone.to_string();
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 3..].iter().collect();
    format!("{}{}{}", head, "*".repeat(chars.len() - 6), tail)
}
