//! # Record Table
//!
//! At most one record per identity. A phone index maps each bound phone to
//! the identity holding it, so the conflict check on issue is a single lookup.
//!
//! A record is live while `now <= expires_at`.

use crate::domain::code::OtpCode;
use crate::domain::errors::OtpError;
use shared_types::{Identity, PhoneNumber, Timestamp};
use std::collections::HashMap;

/// An issued passcode awaiting submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpRecord {
    pub code: OtpCode,
    pub bound_phone: PhoneNumber,
    pub expires_at: Timestamp,
}

impl OtpRecord {
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now > self.expires_at
    }
}

/// Outcome of checking a submitted code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpCheck {
    /// Exact match against a live record; the record is consumed.
    Accepted,
    /// Live record, wrong code; the record is kept.
    Mismatch,
    /// The record had expired; it has been deleted.
    Expired,
    /// No record for this identity.
    NotFound,
}

#[derive(Debug, Default)]
pub struct OtpTable {
    records: HashMap<Identity, OtpRecord>,
    phones: HashMap<PhoneNumber, Identity>,
}

impl OtpTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `code` for `identity`, replacing any previous record.
    pub fn issue(
        &mut self,
        identity: &Identity,
        phone: &PhoneNumber,
        code: OtpCode,
        now: Timestamp,
        ttl_secs: u64,
    ) -> Result<(), OtpError> {
        if let Some(holder) = self.phones.get(phone).cloned() {
            if holder != *identity {
                let live = self
                    .records
                    .get(&holder)
                    .map(|record| !record.is_expired(now))
                    .unwrap_or(false);
                if live {
                    return Err(OtpError::PhoneAlreadyBound);
                }
                self.remove(&holder);
            }
        }

        self.remove(identity);
        self.phones.insert(phone.clone(), identity.clone());
        self.records.insert(
            identity.clone(),
            OtpRecord {
                code,
                bound_phone: phone.clone(),
                expires_at: now.saturating_add(ttl_secs),
            },
        );
        Ok(())
    }

    pub fn check(&mut self, identity: &Identity, submitted: &str, now: Timestamp) -> OtpCheck {
        let Some(record) = self.records.get(identity) else {
            return OtpCheck::NotFound;
        };

        if record.is_expired(now) {
            self.remove(identity);
            return OtpCheck::Expired;
        }
        if record.code.matches(submitted) {
            self.remove(identity);
            return OtpCheck::Accepted;
        }
        OtpCheck::Mismatch
    }

    /// Remove the record only if it still holds `code`.
    pub fn revoke(&mut self, identity: &Identity, code: &OtpCode) -> bool {
        let holds = self
            .records
            .get(identity)
            .map(|record| record.code == *code)
            .unwrap_or(false);
        if holds {
            self.remove(identity);
        }
        holds
    }

    pub fn discard(&mut self, identity: &Identity) -> bool {
        self.remove(identity).is_some()
    }

    /// Delete every record with `expires_at < now`.
    pub fn sweep(&mut self, now: Timestamp) -> usize {
        let expired: Vec<Identity> = self
            .records
            .iter()
            .filter(|(_, record)| record.is_expired(now))
            .map(|(identity, _)| identity.clone())
            .collect();
        for identity in &expired {
            self.remove(identity);
        }
        expired.len()
    }

    pub fn get(&self, identity: &Identity) -> Option<&OtpRecord> {
        self.records.get(identity)
    }

    /// Identity holding `phone`, live or not.
    pub fn holder_of(&self, phone: &PhoneNumber) -> Option<&Identity> {
        self.phones.get(phone)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn remove(&mut self, identity: &Identity) -> Option<OtpRecord> {
        let record = self.records.remove(identity)?;
        if self.phones.get(&record.bound_phone) == Some(identity) {
            self.phones.remove(&record.bound_phone);
        }
        Some(record)
    }
}
