//! Cross-subsystem integration tests.

#[cfg(test)]
mod fixtures;

pub mod launch_tokens;
pub mod maintenance;
pub mod verification;
