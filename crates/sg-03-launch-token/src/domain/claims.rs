//! # Claim Set
//!
//! Flat `name=value` pairs joined with `&`. Values are carried verbatim;
//! identities are validated upstream to contain none of `& = ? #`.

use crate::domain::verdict::TokenRejection;
use std::collections::HashSet;

pub const USER: &str = "user";
pub const AUTH_DATE: &str = "auth_date";
pub const START_PARAM: &str = "start_param";
pub const SESSION: &str = "session";
pub const HASH: &str = "hash";

/// Claims that must be present for a token to be considered at all.
pub const REQUIRED_CLAIMS: [&str; 4] = [USER, AUTH_DATE, SESSION, HASH];

/// Ordered claim set. Insertion order is the serialization order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Claims {
    pairs: Vec<(String, String)>,
}

impl Claims {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((name.into(), value.into()));
        self
    }

    /// Parse a bare token or a full launch URL.
    ///
    /// Everything up to and including the first `?` is ignored.
    pub fn parse(raw: &str) -> Result<Self, TokenRejection> {
        let raw = raw.trim();
        let query = raw.split_once('?').map_or(raw, |(_, query)| query);
        if query.is_empty() {
            return Err(TokenRejection::Malformed);
        }

        let mut seen = HashSet::new();
        let mut pairs = Vec::new();
        for pair in query.split('&') {
            let (name, value) = pair.split_once('=').ok_or(TokenRejection::Malformed)?;
            if name.is_empty() || !seen.insert(name) {
                return Err(TokenRejection::Malformed);
            }
            pairs.push((name.to_string(), value.to_string()));
        }
        Ok(Self { pairs })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// First required claim that is absent, if any.
    pub fn missing_required(&self) -> Option<&'static str> {
        REQUIRED_CLAIMS
            .iter()
            .copied()
            .find(|name| self.get(name).is_none())
    }

    /// Every claim except `hash`, as `name=value`, sorted by name, joined with `\n`.
    pub fn check_string(&self) -> String {
        let mut signed: Vec<&(String, String)> =
            self.pairs.iter().filter(|(name, _)| name != HASH).collect();
        signed.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        signed
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Query-string form in insertion order.
    pub fn encode(&self) -> String {
        self.pairs
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
