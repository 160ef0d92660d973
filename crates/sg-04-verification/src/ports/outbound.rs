//! # Outbound Ports (Driven Ports / SPI)

use async_trait::async_trait;
use shared_types::PhoneNumber;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct DeliveryError(pub String);

/// Delivers the verification code. Called once per issued code, never retried.
#[async_trait]
pub trait SmsGateway: Send + Sync {
    async fn send_sms(&self, phone: &PhoneNumber, message: &str) -> Result<(), DeliveryError>;
}
