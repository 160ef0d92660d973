//! # OTP Store Subsystem (SG-02)
//!
//! Issues and checks six-digit one-time passcodes, one live record per identity.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): codes, records, and the record table
//! - **Ports Layer** (`ports/`): `OtpStoreApi` (inbound), `DigitSource` (outbound)
//! - **Adapters** (`adapters/`): OS-entropy and deterministic digit sources
//! - **Service Layer** (`service.rs`): lock + clock + digit source around the table
//!
//! ## Security Notes
//!
//! - Codes come from the OS CSPRNG. If it fails the store falls back to a
//!   time-seeded generator and logs a warning; it never falls back silently.
//! - A phone number can be bound to at most one identity's live record.
//! - Codes are compared in constant time and never logged.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::random::{FailingDigitSource, OsDigitSource, SequenceDigitSource};
pub use domain::code::{generate_code, OtpCode, OTP_LENGTH};
pub use domain::errors::OtpError;
pub use domain::store::{OtpCheck, OtpRecord, OtpTable};
pub use ports::inbound::OtpStoreApi;
pub use ports::outbound::{DigitSource, EntropyError};
pub use service::{OtpConfig, OtpStoreService};
