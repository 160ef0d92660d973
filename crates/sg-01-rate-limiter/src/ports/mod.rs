//! # Ports Layer
//!
//! - **Inbound (Driving)**: API that the verification orchestrator uses

pub mod inbound;
