//! # Verification Orchestrator (SG-04)
//!
//! Composes the rate limiter (SG-01), OTP store (SG-02) and launch token
//! signer (SG-03) into the per-identity phone verification state machine.
//!
//! ## State Machine
//!
//! ```text
//! Unverified --request_verification--> AwaitingOtp --submit_otp--> Verified
//!      ^                                    |
//!      +------ cancel / delivery failure ---+
//! ```
//!
//! `Verified` is terminal for the lifetime of the process. A transfer
//! sub-flow runs alongside it:
//!
//! ```text
//! Idle -> AwaitingCounterparty -> AwaitingAmount -> AwaitingConfirmation -> Idle
//! ```
//!
//! ## Locking
//!
//! One mutex guards the session map. While it is held the service may take
//! the rate limiter and OTP store locks, never the reverse, and it is always
//! released before awaiting SMS delivery.

pub mod domain;
pub mod ports;
pub mod service;
pub mod sweeper;

pub use domain::errors::VerificationError;
pub use domain::session::{Session, SessionState};
pub use domain::transfer::{
    parse_amount_cents, TransferError, TransferIntent, TransferKind, TransferState,
    MAX_TRANSFER_CENTS,
};
pub use ports::inbound::{SweepReport, VerificationApi};
pub use ports::outbound::{DeliveryError, SmsGateway};
pub use service::{VerificationConfig, VerificationService};
pub use sweeper::{spawn_sweeper, SweepConfig};
