//! # Ports Layer
//!
//! - **Inbound (Driving)**: the operations the conversational layer calls
//! - **Outbound (Driven)**: SMS delivery

pub mod inbound;
pub mod outbound;
