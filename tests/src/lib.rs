//! # Session-Gate Test Suite
//!
//! Unified test crate for flows that cross subsystem boundaries.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs         # Wired service, recording SMS gateway
//!     ├── verification.rs     # Rate limit, OTP and session flows
//!     ├── launch_tokens.rs    # Minting and verifying launch URLs
//!     └── maintenance.rs      # Sweeper and console flows
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sg-tests
//! cargo test -p sg-tests integration::launch_tokens
//!
//! # Benchmarks
//! cargo bench -p sg-tests
//! ```

pub mod integration;
