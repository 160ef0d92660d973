//! # Runtime Configuration
//!
//! Read from environment variables once at startup.
//!
//! ## Security Requirements
//!
//! - `SG_DEPLOY_TOKEN` MUST be set; it is the only startup-fatal condition
//! - The token is held as a [`DeployToken`] and never printed

use gate_telemetry::TelemetryConfig;
use sg_01_rate_limiter::RateLimitConfig;
use sg_02_otp_store::OtpConfig;
use sg_03_launch_token::{DeployToken, TokenConfig, TokenError};
use sg_04_verification::{SweepConfig, VerificationConfig};
use std::env;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    /// `None` when `SG_DEPLOY_TOKEN` is unset or empty.
    pub deploy_token: Option<DeployToken>,
    pub verification: VerificationConfig,
    pub rate_limits: RateLimitConfig,
    pub otp: OtpConfig,
    pub token: TokenConfig,
    pub sweep: SweepConfig,
    pub telemetry: TelemetryConfig,
    /// Print outgoing SMS bodies to stdout (development only).
    pub sms_echo: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "SECURITY VIOLATION: deploy token is not set. \
         Set the SG_DEPLOY_TOKEN environment variable."
    )]
    MissingDeployToken,

    #[error("invalid deploy token: {0}")]
    InvalidDeployToken(#[from] TokenError),

    #[error("{key} must be a number, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
}

impl RuntimeConfig {
    /// Load configuration from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `SG_DEPLOY_TOKEN`: signing secret (required in production)
    /// - `SG_WEBAPP_URL`: mini-app base URL
    /// - `SG_SWEEP_INTERVAL_SECS`: sweep period (default: 900)
    /// - `SG_OTP_TTL_SECS`: code lifetime (default: 300)
    /// - `SG_TOKEN_FRESHNESS_SECS`: launch token max age (default: 300)
    /// - `SG_SMS_ECHO`: print SMS bodies to stdout (default: false)
    /// - telemetry variables, see [`TelemetryConfig::from_env`]
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self {
            telemetry: TelemetryConfig::from_lookup(&lookup),
            ..Self::default()
        };

        config.deploy_token = lookup("SG_DEPLOY_TOKEN")
            .filter(|raw| !raw.is_empty())
            .map(DeployToken::new)
            .transpose()?;

        if let Some(url) = lookup("SG_WEBAPP_URL").filter(|u| !u.is_empty()) {
            config.verification.webapp_url = url;
        }
        if let Some(secs) = parse_number::<u64>(&lookup, "SG_SWEEP_INTERVAL_SECS")? {
            config.sweep.interval_secs = secs;
        }
        if let Some(secs) = parse_number::<u64>(&lookup, "SG_OTP_TTL_SECS")? {
            config.otp.ttl_secs = secs;
            config.verification.otp_ttl_secs = secs;
        }
        if let Some(secs) = parse_number::<u64>(&lookup, "SG_TOKEN_FRESHNESS_SECS")? {
            config.token.freshness_secs = secs;
        }
        config.sms_echo = lookup("SG_SMS_ECHO")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(false);

        Ok(config)
    }

    /// Validate configuration for production readiness.
    pub fn validate_for_production(&self) -> Result<(), ConfigError> {
        self.deploy_token()?;
        Ok(())
    }

    pub fn deploy_token(&self) -> Result<&DeployToken, ConfigError> {
        self.deploy_token
            .as_ref()
            .ok_or(ConfigError::MissingDeployToken)
    }
}

fn parse_number<N: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<N>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<RuntimeConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RuntimeConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.otp.ttl_secs, 300);
        assert_eq!(config.token.freshness_secs, 300);
        assert_eq!(config.sweep.interval_secs, 900);
        assert!(!config.sms_echo);
    }

    #[test]
    fn test_validate_rejects_missing_token() {
        let config = load(&[]).unwrap();
        assert!(matches!(
            config.validate_for_production(),
            Err(ConfigError::MissingDeployToken)
        ));

        let config = load(&[("SG_DEPLOY_TOKEN", "")]).unwrap();
        assert!(config.validate_for_production().is_err());
    }

    #[test]
    fn test_validate_accepts_token() {
        let config = load(&[("SG_DEPLOY_TOKEN", "123:abc")]).unwrap();
        assert!(config.validate_for_production().is_ok());
        assert!(!format!("{:?}", config).contains("123:abc"));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SG_WEBAPP_URL", "https://app.example.com/launch"),
            ("SG_OTP_TTL_SECS", "120"),
            ("SG_TOKEN_FRESHNESS_SECS", "60"),
            ("SG_SWEEP_INTERVAL_SECS", "30"),
            ("SG_SMS_ECHO", "1"),
        ])
        .unwrap();
        assert_eq!(config.verification.webapp_url, "https://app.example.com/launch");
        assert_eq!(config.otp.ttl_secs, 120);
        assert_eq!(config.verification.otp_ttl_secs, 120);
        assert_eq!(config.token.freshness_secs, 60);
        assert_eq!(config.sweep.interval_secs, 30);
        assert!(config.sms_echo);
    }

    #[test]
    fn test_invalid_number() {
        assert!(matches!(
            load(&[("SG_OTP_TTL_SECS", "five")]),
            Err(ConfigError::InvalidNumber {
                key: "SG_OTP_TTL_SECS",
                ..
            })
        ));
    }
}
