//! # Verification Service
//!
//! Implements `VerificationApi` over the three leaf subsystems and an SMS
//! gateway.
//!
//! ## Ordering
//!
//! The rate limiter is consulted before the phone or code is validated, so
//! malformed attempts count against the limit. Failures are detected before
//! any session is mutated.

use crate::domain::errors::VerificationError;
use crate::domain::session::{Session, SessionState};
use crate::domain::transfer::{TransferIntent, TransferKind, TransferState};
use crate::ports::inbound::{SweepReport, VerificationApi};
use crate::ports::outbound::SmsGateway;
use async_trait::async_trait;
use parking_lot::Mutex;
use sg_01_rate_limiter::{RateLimiterApi, OTP_REQUEST, OTP_VERIFY};
use sg_02_otp_store::{OtpCheck, OtpCode, OtpError, OtpStoreApi};
use sg_03_launch_token::{LaunchTokenApi, TokenVerdict};
use shared_types::{Identity, PhoneNumber, Timestamp};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationConfig {
    /// Base URL of the mini-app; launch URLs are `<webapp_url>?<token>`.
    pub webapp_url: String,
    /// Code lifetime quoted in the SMS body.
    pub otp_ttl_secs: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            webapp_url: "http://localhost:8080/webapp".to_string(),
            otp_ttl_secs: 300,
        }
    }
}

/// Verification Orchestrator.
///
/// Shared across conversation handlers via `Arc`.
pub struct VerificationService<R, O, K, S>
where
    R: RateLimiterApi,
    O: OtpStoreApi,
    K: LaunchTokenApi,
    S: SmsGateway,
{
    config: VerificationConfig,
    sessions: Mutex<HashMap<Identity, Session>>,
    rate_limiter: Arc<R>,
    otp_store: Arc<O>,
    tokens: Arc<K>,
    sms: Arc<S>,
}

impl<R, O, K, S> VerificationService<R, O, K, S>
where
    R: RateLimiterApi,
    O: OtpStoreApi,
    K: LaunchTokenApi,
    S: SmsGateway,
{
    pub fn new(
        config: VerificationConfig,
        rate_limiter: Arc<R>,
        otp_store: Arc<O>,
        tokens: Arc<K>,
        sms: Arc<S>,
    ) -> Self {
        Self {
            config,
            sessions: Mutex::new(HashMap::new()),
            rate_limiter,
            otp_store,
            tokens,
            sms,
        }
    }

    pub fn config(&self) -> &VerificationConfig {
        &self.config
    }

    /// Number of identities with non-default session state.
    pub fn active_sessions(&self) -> usize {
        self.sessions.lock().len()
    }

    fn sms_body(&self, code: &OtpCode) -> String {
        format!(
            "Your verification code is: {}\nValid for {} minutes.",
            code.as_str(),
            self.config.otp_ttl_secs.div_ceil(60)
        )
    }

    /// Issue a code and move the session to `AwaitingOtp`, all under the
    /// session lock.
    fn start_challenge(
        &self,
        identity: &Identity,
        raw_phone: &str,
    ) -> Result<(PhoneNumber, OtpCode), VerificationError> {
        let mut sessions = self.sessions.lock();
        if sessions.get(identity).is_some_and(Session::is_verified) {
            return Err(VerificationError::AlreadyVerified);
        }

        if !self.rate_limiter.check_and_consume(identity, OTP_REQUEST) {
            return Err(VerificationError::RateLimited);
        }

        let phone = PhoneNumber::parse(raw_phone)
            .map_err(|e| VerificationError::InvalidFormat(e.to_string()))?;

        let code = self.otp_store.issue(identity, &phone).map_err(|e| match e {
            OtpError::PhoneAlreadyBound => VerificationError::PhoneConflict,
            OtpError::InvalidFormat => VerificationError::InvalidFormat(e.to_string()),
        })?;

        sessions.entry(identity.clone()).or_default().state = SessionState::AwaitingOtp {
            phone: phone.clone(),
        };
        Ok((phone, code))
    }

    /// Undo a challenge whose code could not be delivered.
    fn abandon_challenge(&self, identity: &Identity, phone: &PhoneNumber, code: &OtpCode) {
        let mut sessions = self.sessions.lock();
        // False if a newer request or a cancel already replaced this code
        if !self.otp_store.revoke(identity, code) {
            return;
        }

        if let Some(session) = sessions.get_mut(identity) {
            if session.state == (SessionState::AwaitingOtp { phone: phone.clone() }) {
                session.state = SessionState::Unverified;
            }
            if session.is_resting() {
                sessions.remove(identity);
            }
        }
    }

    fn with_verified<T>(
        &self,
        identity: &Identity,
        f: impl FnOnce(&mut Session) -> Result<T, VerificationError>,
    ) -> Result<T, VerificationError> {
        let mut sessions = self.sessions.lock();
        match sessions.get_mut(identity) {
            Some(session) if session.is_verified() => f(session),
            _ => Err(VerificationError::NotVerified),
        }
    }
}

#[async_trait]
impl<R, O, K, S> VerificationApi for VerificationService<R, O, K, S>
where
    R: RateLimiterApi,
    O: OtpStoreApi,
    K: LaunchTokenApi,
    S: SmsGateway,
{
    async fn request_verification(
        &self,
        identity: &Identity,
        raw_phone: &str,
    ) -> Result<PhoneNumber, VerificationError> {
        let (phone, code) = self.start_challenge(identity, raw_phone)?;
        let body = self.sms_body(&code);

        match self.sms.send_sms(&phone, &body).await {
            Ok(()) => {
                info!(identity = %identity, phone = %phone, "Verification code sent");
                Ok(phone)
            }
            Err(e) => {
                warn!(identity = %identity, phone = %phone, error = %e, "SMS delivery failed");
                self.abandon_challenge(identity, &phone, &code);
                Err(VerificationError::DeliveryFailed(e.to_string()))
            }
        }
    }

    fn submit_otp(
        &self,
        identity: &Identity,
        code: &str,
    ) -> Result<PhoneNumber, VerificationError> {
        let mut sessions = self.sessions.lock();
        let phone = match sessions.get(identity).map(|s| &s.state) {
            Some(SessionState::AwaitingOtp { phone }) => phone.clone(),
            Some(SessionState::Verified { .. }) => return Err(VerificationError::AlreadyVerified),
            _ => return Err(VerificationError::NotAwaitingOtp),
        };

        if !self.rate_limiter.check_and_consume(identity, OTP_VERIFY) {
            return Err(VerificationError::RateLimited);
        }

        let code = code.trim();
        OtpCode::parse(code).map_err(|e| VerificationError::InvalidFormat(e.to_string()))?;

        match self.otp_store.check(identity, code) {
            OtpCheck::Accepted => {
                if let Some(session) = sessions.get_mut(identity) {
                    session.state = SessionState::Verified {
                        phone: phone.clone(),
                    };
                }
                info!(identity = %identity, phone = %phone, "Phone verified");
                Ok(phone)
            }
            OtpCheck::Mismatch => {
                let remaining_attempts = self
                    .rate_limiter
                    .remaining(identity, OTP_VERIFY)
                    .unwrap_or(0);
                warn!(identity = %identity, remaining_attempts, "Verification code mismatch");
                Err(VerificationError::Mismatch { remaining_attempts })
            }
            OtpCheck::Expired | OtpCheck::NotFound => Err(VerificationError::Expired),
        }
    }

    fn is_verified(&self, identity: &Identity) -> bool {
        self.sessions
            .lock()
            .get(identity)
            .is_some_and(Session::is_verified)
    }

    fn session_state(&self, identity: &Identity) -> SessionState {
        self.sessions
            .lock()
            .get(identity)
            .map(|session| session.state.clone())
            .unwrap_or_default()
    }

    fn mint_launch_token(&self, identity: &Identity) -> String {
        self.tokens.mint(identity)
    }

    fn mint_launch_url(&self, identity: &Identity) -> String {
        format!("{}?{}", self.config.webapp_url, self.mint_launch_token(identity))
    }

    fn verify_launch_token(&self, raw: &str, identity: &Identity) -> TokenVerdict {
        self.tokens.verify(raw, identity)
    }

    fn cancel(&self, identity: &Identity) -> bool {
        let mut sessions = self.sessions.lock();
        let Some(session) = sessions.get_mut(identity) else {
            return false;
        };

        let mut cancelled = false;
        if matches!(session.state, SessionState::AwaitingOtp { .. }) {
            self.otp_store.discard(identity);
            session.state = SessionState::Unverified;
            cancelled = true;
        }
        if !session.transfer.is_idle() {
            session.transfer = TransferState::Idle;
            cancelled = true;
        }
        if session.is_resting() {
            sessions.remove(identity);
        }
        if cancelled {
            info!(identity = %identity, "Operation cancelled");
        }
        cancelled
    }

    fn begin_transfer(
        &self,
        identity: &Identity,
        kind: TransferKind,
    ) -> Result<TransferState, VerificationError> {
        self.with_verified(identity, |session| {
            session.transfer = TransferState::AwaitingCounterparty { kind };
            Ok(session.transfer.clone())
        })
    }

    fn submit_transfer_input(
        &self,
        identity: &Identity,
        input: &str,
    ) -> Result<TransferState, VerificationError> {
        self.with_verified(identity, |session| {
            session.transfer = session.transfer.advance(input)?;
            Ok(session.transfer.clone())
        })
    }

    fn confirm_transfer(&self, identity: &Identity) -> Result<TransferIntent, VerificationError> {
        self.with_verified(identity, |session| {
            let intent = session.transfer.confirm()?;
            session.transfer = TransferState::Idle;
            info!(
                identity = %identity,
                kind = intent.kind.as_str(),
                counterparty = %intent.counterparty,
                amount_cents = intent.amount_cents,
                "Transfer confirmed"
            );
            Ok(intent)
        })
    }

    fn sweep(&self, now: Timestamp) -> SweepReport {
        let _sessions = self.sessions.lock();
        let report = SweepReport {
            otps_removed: self.otp_store.sweep(now),
            rate_limits_removed: self.rate_limiter.sweep(now),
        };
        info!(
            otps_removed = report.otps_removed,
            rate_limits_removed = report.rate_limits_removed,
            "Sweep complete"
        );
        report
    }
}
