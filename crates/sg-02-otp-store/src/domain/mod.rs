//! # Domain Layer
//!
//! Pure passcode logic with no I/O dependencies.

pub mod code;
pub mod errors;
pub mod store;
