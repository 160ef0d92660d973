//! # Service Container
//!
//! Builds the orchestrator and its subsystems from a [`RuntimeConfig`].

use crate::config::{ConfigError, RuntimeConfig};
use sg_01_rate_limiter::RateLimiterService;
use sg_02_otp_store::{DigitSource, OtpStoreService};
use sg_03_launch_token::LaunchTokenService;
use sg_04_verification::{SmsGateway, VerificationService};
use shared_types::TimeSource;
use std::sync::Arc;
use tracing::info;

/// The fully wired orchestrator.
pub type GateService<T, D, S> = VerificationService<
    RateLimiterService<T>,
    OtpStoreService<T, D>,
    LaunchTokenService<T>,
    S,
>;

/// Wire every subsystem around one clock.
///
/// # Errors
/// * `ConfigError::MissingDeployToken` - no deploy token configured
pub fn build_service<T, D, S>(
    config: &RuntimeConfig,
    clock: T,
    digits: D,
    sms: Arc<S>,
) -> Result<Arc<GateService<T, D, S>>, ConfigError>
where
    T: TimeSource + Clone,
    D: DigitSource,
    S: SmsGateway,
{
    let deploy_token = config.deploy_token()?;

    let rate_limiter = RateLimiterService::new(config.rate_limits.clone(), clock.clone());
    let otp_store = OtpStoreService::new(config.otp, clock.clone(), digits);
    let tokens = LaunchTokenService::new(deploy_token, config.token.clone(), clock)?;

    info!(
        otp_ttl_secs = config.otp.ttl_secs,
        token_freshness_secs = config.token.freshness_secs,
        webapp_url = %config.verification.webapp_url,
        "Verification service initialized"
    );

    Ok(Arc::new(VerificationService::new(
        config.verification.clone(),
        Arc::new(rate_limiter),
        Arc::new(otp_store),
        Arc::new(tokens),
        sms,
    )))
}
