//! Digit source adapters.

pub mod random;
