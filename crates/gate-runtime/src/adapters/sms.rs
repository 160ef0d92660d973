//! # SMS Adapter
//!
//! Stand-in for a real carrier. Logs the masked destination and, in
//! development, prints the body so the code can be entered by hand.

use async_trait::async_trait;
use shared_types::PhoneNumber;
use sg_04_verification::{DeliveryError, SmsGateway};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

#[derive(Debug, Default)]
pub struct LoggingSmsGateway {
    echo: bool,
    delivered: AtomicU64,
}

impl LoggingSmsGateway {
    pub fn new(echo: bool) -> Self {
        Self {
            echo,
            delivered: AtomicU64::new(0),
        }
    }

    /// Messages accepted so far.
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl SmsGateway for LoggingSmsGateway {
    async fn send_sms(&self, phone: &PhoneNumber, message: &str) -> Result<(), DeliveryError> {
        self.delivered.fetch_add(1, Ordering::Relaxed);
        info!(phone = %phone, bytes = message.len(), "SMS accepted for delivery");
        if self.echo {
            println!("[sms to {}] {}", phone, message);
        }
        Ok(())
    }
}
