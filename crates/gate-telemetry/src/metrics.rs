//! Prometheus metrics for Session-Gate.
//!
//! All metrics follow the naming convention: `sg_<subject>_<metric>_total`.
//! They are recorded by the runtime adapter, never by the subsystems.

use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Verification code requests by outcome (sent, rate_limited, phone_conflict, ...)
    pub static ref OTP_REQUESTS: IntCounterVec = IntCounterVec::new(
        Opts::new("sg_otp_requests_total", "Verification code requests"),
        &["outcome"]
    ).expect("metric creation failed");

    /// Verification code submissions by outcome (verified, mismatch, expired, ...)
    pub static ref OTP_VERIFICATIONS: IntCounterVec = IntCounterVec::new(
        Opts::new("sg_otp_verifications_total", "Verification code submissions"),
        &["outcome"]
    ).expect("metric creation failed");

    /// Attempts denied by the rate limiter
    pub static ref RATE_LIMIT_DENIALS: IntCounterVec = IntCounterVec::new(
        Opts::new("sg_rate_limit_denials_total", "Attempts denied by the rate limiter"),
        &["action"]
    ).expect("metric creation failed");

    /// Launch tokens minted and verified
    pub static ref LAUNCH_TOKENS: IntCounterVec = IntCounterVec::new(
        Opts::new("sg_launch_tokens_total", "Launch token operations"),
        &["operation", "result"]  // operation: mint/verify, result: ok or rejection reason
    ).expect("metric creation failed");

    /// Records removed by sweeps
    pub static ref SWEEP_REMOVED: IntCounterVec = IntCounterVec::new(
        Opts::new("sg_sweep_removed_total", "Records removed by periodic sweeps"),
        &["store"]  // store: otp/rate_limit
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry. Safe to call more than once.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(OTP_REQUESTS.clone()),
        Box::new(OTP_VERIFICATIONS.clone()),
        Box::new(RATE_LIMIT_DENIALS.clone()),
        Box::new(LAUNCH_TOKENS.clone()),
        Box::new(SWEEP_REMOVED.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }
    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

pub fn record_otp_request(outcome: &str) {
    OTP_REQUESTS.with_label_values(&[outcome]).inc();
}

pub fn record_otp_verification(outcome: &str) {
    OTP_VERIFICATIONS.with_label_values(&[outcome]).inc();
}

pub fn record_rate_limit_denial(action: &str) {
    RATE_LIMIT_DENIALS.with_label_values(&[action]).inc();
}

pub fn record_launch_token(operation: &str, result: &str) {
    LAUNCH_TOKENS.with_label_values(&[operation, result]).inc();
}

pub fn record_sweep(otps_removed: usize, rate_limits_removed: usize) {
    SWEEP_REMOVED
        .with_label_values(&["otp"])
        .inc_by(otps_removed as u64);
    SWEEP_REMOVED
        .with_label_values(&["rate_limit"])
        .inc_by(rate_limits_removed as u64);
}
