//! # Session-Gate Runtime
//!
//! Wires the subsystems together and exposes them through a line-based
//! console, standing in for the chat front end.
//!
//! ## Modules
//!
//! - `config` - environment configuration and production validation
//! - `container` - builds the orchestrator around one clock
//! - `adapters` - SMS gateway stand-in
//! - `console` - command parsing and dispatch, metrics recording
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Initialize logging and metrics
//! 3. Validate the deploy token is set
//! 4. Build the orchestrator and start the sweeper
//! 5. Serve console commands until EOF or Ctrl+C

pub mod adapters;
pub mod config;
pub mod console;
pub mod container;
