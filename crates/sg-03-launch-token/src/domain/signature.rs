//! # Token Keys
//!
//! Both HMAC keys are derived once from the deploy token and kept as keyed
//! MAC states; each operation clones the state and feeds it one message.

use crate::domain::claims::{Claims, AUTH_DATE, HASH, SESSION, START_PARAM, USER};
use crate::domain::config::TokenConfig;
use crate::domain::errors::TokenError;
use crate::domain::secret::DeployToken;
use crate::domain::verdict::TokenRejection;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use shared_types::{Identity, Timestamp};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

type HmacSha256 = Hmac<Sha256>;

/// Fixed key for deriving the signing key from the deploy token.
pub const SIGNING_KEY_LABEL: &[u8] = b"WebAppData";

#[derive(Clone)]
pub struct TokenKeys {
    /// Keyed with the deploy token; produces the `session` claim.
    session_mac: HmacSha256,
    /// Keyed with `HMAC("WebAppData", deploy_token)`; produces `hash`.
    signing_mac: HmacSha256,
}

impl TokenKeys {
    pub fn derive(deploy_token: &DeployToken) -> Result<Self, TokenError> {
        let session_mac = new_mac(deploy_token.expose())?;

        let mut label_mac = new_mac(SIGNING_KEY_LABEL)?;
        label_mac.update(deploy_token.expose());
        let mut secret_key = [0u8; 32];
        secret_key.copy_from_slice(&label_mac.finalize().into_bytes());

        let signing_mac = new_mac(&secret_key);
        secret_key.zeroize();

        Ok(Self {
            session_mac,
            signing_mac: signing_mac?,
        })
    }

    /// Session claim for `identity`: hex HMAC truncated to `prefix_len`.
    pub fn session_claim(&self, identity: &str, prefix_len: usize) -> String {
        let mut mac = self.session_mac.clone();
        mac.update(identity.as_bytes());
        let mut session = hex::encode(mac.finalize().into_bytes());
        session.truncate(prefix_len);
        session
    }

    /// Lowercase hex signature over `check_string`.
    pub fn sign(&self, check_string: &str) -> String {
        let mut mac = self.signing_mac.clone();
        mac.update(check_string.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Build the signed claim set for `identity` at `now`.
    pub fn mint(&self, identity: &Identity, now: Timestamp, config: &TokenConfig) -> Claims {
        let claims = Claims::new()
            .with(USER, identity.as_str())
            .with(AUTH_DATE, now.to_string())
            .with(START_PARAM, config.purpose_tag.as_str())
            .with(
                SESSION,
                self.session_claim(identity.as_str(), config.session_prefix_len),
            );
        let hash = self.sign(&claims.check_string());
        claims.with(HASH, hash)
    }

    /// Run every check in order, stopping at the first failure.
    pub fn check(
        &self,
        raw: &str,
        expected: &Identity,
        now: Timestamp,
        config: &TokenConfig,
    ) -> Result<(), TokenRejection> {
        let claims = Claims::parse(raw)?;
        if claims.missing_required().is_some() {
            return Err(TokenRejection::Malformed);
        }
        let field = |name| claims.get(name).ok_or(TokenRejection::Malformed);

        let user = field(USER)?;
        if user != expected.as_str() {
            return Err(TokenRejection::IdentityMismatch);
        }

        let expected_session = self.session_claim(user, config.session_prefix_len);
        if !ct_str_eq(&expected_session, field(SESSION)?) {
            return Err(TokenRejection::SessionMismatch);
        }

        let auth_date: Timestamp = field(AUTH_DATE)?
            .parse()
            .map_err(|_| TokenRejection::Malformed)?;
        if now.saturating_sub(auth_date) > config.freshness_secs
            || auth_date > now.saturating_add(config.future_skew_secs)
        {
            return Err(TokenRejection::Stale);
        }

        let expected_hash = self.sign(&claims.check_string());
        if !ct_str_eq(&expected_hash, field(HASH)?) {
            return Err(TokenRejection::SignatureInvalid);
        }
        Ok(())
    }
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TokenKeys(***)")
    }
}

fn new_mac(key: &[u8]) -> Result<HmacSha256, TokenError> {
    HmacSha256::new_from_slice(key).map_err(|e| TokenError::InvalidKey(e.to_string()))
}

/// Constant-time string comparison. Lengths are not secret.
fn ct_str_eq(expected: &str, provided: &str) -> bool {
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}
