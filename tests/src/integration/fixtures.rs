//! Shared test fixtures: the fully wired service on a mock clock.

use async_trait::async_trait;
use gate_runtime::config::RuntimeConfig;
use gate_runtime::container::{build_service, GateService};
use parking_lot::Mutex;
use sg_02_otp_store::SequenceDigitSource;
use sg_03_launch_token::DeployToken;
use sg_04_verification::{DeliveryError, SmsGateway};
use shared_types::{MockTimeSource, PhoneNumber, Timestamp};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub const START: Timestamp = 1_700_000_000;
pub const PHONE: &str = "+15551234567";
pub const CODE: &str = "246810";
pub const DEPLOY_TOKEN: &str = "123456:integration-deploy-token";

pub type Clock = Arc<MockTimeSource>;
pub type Service = GateService<Clock, SequenceDigitSource, RecordingSms>;

/// Keeps every message; fails while `failing` is set.
#[derive(Default)]
pub struct RecordingSms {
    pub failing: AtomicBool,
    pub outbox: Mutex<Vec<(String, String)>>,
}

impl RecordingSms {
    pub fn sent(&self) -> usize {
        self.outbox.lock().len()
    }

    pub fn last_body(&self) -> Option<String> {
        self.outbox.lock().last().map(|(_, body)| body.clone())
    }
}

#[async_trait]
impl SmsGateway for RecordingSms {
    async fn send_sms(&self, phone: &PhoneNumber, message: &str) -> Result<(), DeliveryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DeliveryError("carrier timeout".to_string()));
        }
        self.outbox
            .lock()
            .push((phone.as_str().to_string(), message.to_string()));
        Ok(())
    }
}

pub struct Gate {
    pub clock: Clock,
    pub sms: Arc<RecordingSms>,
    pub service: Arc<Service>,
}

pub fn config() -> RuntimeConfig {
    RuntimeConfig {
        deploy_token: Some(DeployToken::new(DEPLOY_TOKEN).unwrap()),
        ..RuntimeConfig::default()
    }
}

/// Every issued code is [`CODE`].
pub fn gate() -> Gate {
    gate_with(config(), SequenceDigitSource::from_code(CODE))
}

pub fn gate_with(config: RuntimeConfig, digits: SequenceDigitSource) -> Gate {
    let clock = Arc::new(MockTimeSource::new(START));
    let sms = Arc::new(RecordingSms::default());
    let service = build_service(&config, Arc::clone(&clock), digits, Arc::clone(&sms)).unwrap();
    Gate {
        clock,
        sms,
        service,
    }
}
