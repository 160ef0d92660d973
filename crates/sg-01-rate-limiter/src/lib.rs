//! # Rate Limiter Subsystem (SG-01)
//!
//! Fixed-window counters keyed by `(identity, action)`.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): the window table, pure and clock-free
//! - **Ports Layer** (`ports/`): the `RateLimiterApi` trait
//! - **Service Layer** (`service.rs`): lock + injected clock around the table
//!
//! ## Semantics
//!
//! - A window opens on the first allowed attempt and is never extended by
//!   later attempts. An attempt exactly `window` seconds after the opening
//!   one starts a fresh window.
//! - A denied attempt does not mutate the counter.
//! - Actions without a configured limit are always allowed (fail-open).
//!   This is a known weakness kept for compatibility: a typo in an action
//!   name silently disables limiting for it.

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::config::{ActionLimit, RateLimitConfig, OTP_REQUEST, OTP_VERIFY};
pub use domain::window::{RateLimitTable, WindowRecord};
pub use ports::inbound::RateLimiterApi;
pub use service::RateLimiterService;
