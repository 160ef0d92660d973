//! # Ports Layer
//!
//! - **Inbound (Driving)**: API the orchestrator calls
//! - **Outbound (Driven)**: randomness this subsystem needs

pub mod inbound;
pub mod outbound;
