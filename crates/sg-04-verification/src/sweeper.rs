//! # Periodic Sweeper
//!
//! Background task that calls [`VerificationApi::sweep`] on a fixed
//! interval until shutdown is signalled.

use crate::ports::inbound::{SweepReport, VerificationApi};
use shared_types::TimeSource;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Default sweep interval (15 minutes).
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 900;

/// Delay before the first sweep.
pub const DEFAULT_INITIAL_DELAY_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepConfig {
    pub interval_secs: u64,
    pub initial_delay_secs: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
            initial_delay_secs: DEFAULT_INITIAL_DELAY_SECS,
        }
    }
}

/// Spawn the sweeper. `on_report` sees every completed sweep.
///
/// The task exits when `shutdown` flips to `true` or its sender is dropped.
pub fn spawn_sweeper<V, C, F>(
    service: Arc<V>,
    clock: C,
    config: SweepConfig,
    mut shutdown: watch::Receiver<bool>,
    on_report: F,
) -> JoinHandle<()>
where
    V: VerificationApi + 'static,
    C: TimeSource + 'static,
    F: Fn(&SweepReport) + Send + 'static,
{
    tokio::spawn(async move {
        let period = Duration::from_secs(config.interval_secs.max(1));
        let start = tokio::time::Instant::now() + Duration::from_secs(config.initial_delay_secs);
        let mut interval = tokio::time::interval_at(start, period);
        info!(interval_secs = period.as_secs(), "Sweeper started");

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let report = service.sweep(clock.now());
                    on_report(&report);
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        debug!("Sweeper stopped");
    })
}
