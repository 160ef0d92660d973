//! # Domain Layer
//!
//! Pure token logic. Nothing here reads the clock.

pub mod claims;
pub mod config;
pub mod errors;
pub mod secret;
pub mod signature;
pub mod verdict;
