//! # Adapters
//!
//! Outbound port implementations used by the binary.

pub mod sms;

pub use sms::LoggingSmsGateway;
