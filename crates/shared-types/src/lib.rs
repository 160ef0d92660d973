//! # Shared Types Crate
//!
//! Domain entities shared across the Session-Gate subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Identity`, `PhoneNumber` and `Timestamp` are
//!   defined once and used by the rate limiter, OTP store, token signer and
//!   verification orchestrator alike.
//! - **Injected Time**: domain logic never reads the wall clock directly; it
//!   receives `now` from a [`TimeSource`].
//! - **Redacted by Default**: a `PhoneNumber` never prints in full through
//!   `Display` or `Debug`.

pub mod entities;
pub mod errors;
pub mod time;

pub use entities::*;
pub use errors::*;
pub use time::{MockTimeSource, SystemTimeSource, TimeSource};
