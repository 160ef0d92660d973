//! # Maintenance and Console Flows
//!
//! The periodic sweeper against the wired service, plus the console
//! adapter driving a whole session from text commands.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{gate, CODE, PHONE};
    use gate_runtime::console::Console;
    use parking_lot::Mutex;
    use sg_04_verification::{spawn_sweeper, SweepConfig, SweepReport, VerificationApi};
    use shared_types::Identity;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::watch;

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_drops_expired_codes() {
        let g = gate();
        g.service
            .request_verification(&Identity::from(1u64), PHONE)
            .await
            .unwrap();
        g.service
            .request_verification(&Identity::from(2u64), "+15550000002")
            .await
            .unwrap();
        // Lapse both codes on the service clock before the first tick
        g.clock.advance(301);

        let reports = Arc::new(Mutex::new(Vec::<SweepReport>::new()));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let seen = Arc::clone(&reports);
        let handle = spawn_sweeper(
            Arc::clone(&g.service),
            Arc::clone(&g.clock),
            SweepConfig {
                interval_secs: 60,
                initial_delay_secs: 1,
            },
            shutdown_rx,
            move |report| seen.lock().push(*report),
        );

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(
            reports.lock().first().copied(),
            Some(SweepReport {
                otps_removed: 2,
                rate_limits_removed: 0,
            })
        );

        // Phone freed by the sweep
        assert!(g
            .service
            .request_verification(&Identity::from(3u64), PHONE)
            .await
            .is_ok());

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_evicts_idle_rate_limits() {
        let g = gate();
        g.service
            .request_verification(&Identity::from(1u64), PHONE)
            .await
            .unwrap();
        g.clock.advance(3_601);

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let total = Arc::new(Mutex::new(0usize));
        let seen = Arc::clone(&total);
        let handle = spawn_sweeper(
            Arc::clone(&g.service),
            Arc::clone(&g.clock),
            SweepConfig::default(),
            shutdown_rx,
            move |report| *seen.lock() += report.rate_limits_removed,
        );

        tokio::time::sleep(Duration::from_secs(11)).await;
        assert_eq!(*total.lock(), 1);

        drop(shutdown_tx);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_console_session_script() {
        let g = gate();
        let console = Console::new(Arc::clone(&g.service), Arc::clone(&g.clock));
        let script = format!(
            "status 42\nrequest 42 {PHONE}\notp 42 {CODE}\nstatus 42\n\
             transfer 42 request\ninput 42 +15557654321\ninput 42 $20\n\
             cancel 42\nconfirm 42\nquit\n"
        );
        let mut output = Vec::new();

        console.run(script.as_bytes(), &mut output).await.unwrap();

        let lines: Vec<String> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect();
        assert_eq!(lines[0], "42: not verified");
        assert_eq!(lines[1], "Verification code sent to +15******567.");
        assert!(lines[2].starts_with("Phone +15******567 verified"));
        assert_eq!(lines[3], "42: verified (+15******567)");
        assert!(lines[4].contains("sender"));
        assert!(lines[6].contains("request $20.00 from +15******321"));
        assert_eq!(lines[7], "Operation cancelled.");
        assert!(lines[8].starts_with("Error: transfer: no transfer in progress"));
        assert_eq!(lines[9], "Bye.");
        assert!(g.service.is_verified(&Identity::from(42u64)));
    }
}
