//! # OTP Store Service
//!
//! Implements `OtpStoreApi` over an `OtpTable`. Codes are generated before
//! the lock is taken; issue, check, and sweep each run entirely under it.

use crate::domain::code::{generate_code, OtpCode};
use crate::domain::errors::OtpError;
use crate::domain::store::{OtpCheck, OtpTable};
use crate::ports::inbound::OtpStoreApi;
use crate::ports::outbound::DigitSource;
use parking_lot::Mutex;
use shared_types::{Identity, PhoneNumber, TimeSource, Timestamp};
use tracing::{debug, info};

/// Default passcode lifetime (5 minutes).
pub const DEFAULT_OTP_TTL_SECS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtpConfig {
    /// Seconds a code stays valid after issue.
    pub ttl_secs: u64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_OTP_TTL_SECS,
        }
    }
}

pub struct OtpStoreService<T: TimeSource, R: DigitSource> {
    config: OtpConfig,
    table: Mutex<OtpTable>,
    clock: T,
    digits: R,
}

impl<T: TimeSource, R: DigitSource> OtpStoreService<T, R> {
    pub fn new(config: OtpConfig, clock: T, digits: R) -> Self {
        Self {
            config,
            table: Mutex::new(OtpTable::new()),
            clock,
            digits,
        }
    }

    pub fn config(&self) -> OtpConfig {
        self.config
    }

    /// Number of records currently held, live or expired.
    pub fn pending(&self) -> usize {
        self.table.lock().len()
    }

    /// Expiry of the record held by `identity`, if any.
    pub fn expires_at(&self, identity: &Identity) -> Option<Timestamp> {
        self.table.lock().get(identity).map(|record| record.expires_at)
    }
}

impl<T: TimeSource, R: DigitSource> OtpStoreApi for OtpStoreService<T, R> {
    fn issue(&self, identity: &Identity, phone: &PhoneNumber) -> Result<OtpCode, OtpError> {
        let code = generate_code(&self.digits);
        let now = self.clock.now();

        self.table
            .lock()
            .issue(identity, phone, code.clone(), now, self.config.ttl_secs)?;

        info!(identity = %identity, phone = %phone, "Issued verification code");
        Ok(code)
    }

    fn check(&self, identity: &Identity, submitted: &str) -> OtpCheck {
        let now = self.clock.now();
        let outcome = self.table.lock().check(identity, submitted, now);
        debug!(identity = %identity, outcome = ?outcome, "Checked verification code");
        outcome
    }

    fn revoke(&self, identity: &Identity, code: &OtpCode) -> bool {
        self.table.lock().revoke(identity, code)
    }

    fn discard(&self, identity: &Identity) -> bool {
        self.table.lock().discard(identity)
    }

    fn sweep(&self, now: Timestamp) -> usize {
        let removed = self.table.lock().sweep(now);
        debug!(removed, "Swept expired verification codes");
        removed
    }
}
