//! # Session-Gate Runtime
//!
//! Entry point: loads configuration, starts the sweeper and serves console
//! commands on stdin until EOF or Ctrl+C.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::BufReader;
use tracing::{info, warn};

use gate_runtime::adapters::LoggingSmsGateway;
use gate_runtime::config::RuntimeConfig;
use gate_runtime::console::Console;
use gate_runtime::container::build_service;
use gate_telemetry::{init_telemetry, metrics};
use sg_02_otp_store::OsDigitSource;
use sg_04_verification::spawn_sweeper;
use shared_types::SystemTimeSource;

#[tokio::main]
async fn main() -> Result<()> {
    let config = RuntimeConfig::from_env().context("Failed to load configuration")?;
    init_telemetry(&config.telemetry).context("Failed to initialize telemetry")?;
    config.validate_for_production()?;

    info!("===========================================");
    info!("  Session-Gate Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let service = build_service(
        &config,
        SystemTimeSource,
        OsDigitSource,
        Arc::new(LoggingSmsGateway::new(config.sms_echo)),
    )?;
    if config.sms_echo {
        warn!("SMS echo enabled; verification codes will be printed to stdout");
    }

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let sweeper = spawn_sweeper(
        Arc::clone(&service),
        SystemTimeSource,
        config.sweep,
        shutdown_rx,
        |report| metrics::record_sweep(report.otps_removed, report.rate_limits_removed),
    );

    let console = Console::new(service, SystemTimeSource);
    info!("Ready. Type `help` for commands.");
    tokio::select! {
        served = console.run(BufReader::new(tokio::io::stdin()), tokio::io::stdout()) => {
            served.context("Console I/O failed")?;
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl+C")?;
            info!("Shutdown signal received");
        }
    }

    // Sweeper may already be gone
    let _ = shutdown_tx.send(true);
    sweeper.await.context("Sweeper task panicked")?;
    info!("Session-Gate stopped");
    Ok(())
}
