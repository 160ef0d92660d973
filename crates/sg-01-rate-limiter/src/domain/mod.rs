//! # Domain Layer
//!
//! Pure counting logic. Every operation takes `now` explicitly.

pub mod config;
pub mod window;
