//! # Verification Flows
//!
//! Drives the wired orchestrator through its public API:
//!
//! 1. **Request → Verify**: rate limiting across repeated requests
//! 2. **Phone binding**: one live code per phone across identities
//! 3. **Expiry**: codes stop working after their lifetime
//! 4. **Delivery failure**: a failed send leaves nothing behind

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{config, gate, gate_with, CODE, PHONE};
    use sg_02_otp_store::SequenceDigitSource;
    use sg_04_verification::{SessionState, VerificationApi, VerificationError};
    use shared_types::{Identity, PhoneNumber};
    use std::sync::atomic::Ordering;

    fn who(id: u64) -> Identity {
        Identity::from(id)
    }

    // =========================================================================
    // REQUEST → VERIFY
    // =========================================================================

    #[tokio::test]
    async fn test_fourth_request_in_window_is_rate_limited() {
        let g = gate();
        let id = who(42);

        for _ in 0..3 {
            g.service.request_verification(&id, PHONE).await.unwrap();
            g.clock.advance(10);
        }
        assert_eq!(
            g.service.request_verification(&id, PHONE).await,
            Err(VerificationError::RateLimited)
        );
        assert_eq!(g.sms.sent(), 3);

        // Still inside the first code's five minutes
        let phone = g.service.submit_otp(&id, CODE).unwrap();
        assert_eq!(phone.as_str(), PHONE);
        assert_eq!(
            g.service.session_state(&id),
            SessionState::Verified {
                phone: PhoneNumber::parse(PHONE).unwrap()
            }
        );
    }

    #[tokio::test]
    async fn test_request_window_resets_after_five_minutes() {
        let g = gate();
        let id = who(42);
        for _ in 0..3 {
            g.service.request_verification(&id, PHONE).await.unwrap();
        }

        g.clock.advance(299);
        assert!(g.service.request_verification(&id, PHONE).await.is_err());
        g.clock.advance(1);
        assert!(g.service.request_verification(&id, PHONE).await.is_ok());
    }

    #[tokio::test]
    async fn test_sms_body_carries_code_and_lifetime() {
        let g = gate();
        g.service.request_verification(&who(1), PHONE).await.unwrap();

        assert_eq!(
            g.sms.last_body().as_deref(),
            Some("Your verification code is: 246810\nValid for 5 minutes.")
        );
    }

    #[tokio::test]
    async fn test_sixth_verify_attempt_is_rate_limited() {
        let g = gate();
        let id = who(7);
        g.service.request_verification(&id, PHONE).await.unwrap();

        for expected in (0..5).rev() {
            assert_eq!(
                g.service.submit_otp(&id, "000000"),
                Err(VerificationError::Mismatch {
                    remaining_attempts: expected
                })
            );
        }
        // Correct code, but the limiter speaks first
        assert_eq!(
            g.service.submit_otp(&id, CODE),
            Err(VerificationError::RateLimited)
        );
        assert!(!g.service.is_verified(&id));
    }

    #[tokio::test]
    async fn test_verified_code_is_single_use() {
        let g = gate();
        g.service.request_verification(&who(1), PHONE).await.unwrap();
        g.service.submit_otp(&who(1), CODE).unwrap();

        assert_eq!(
            g.service.submit_otp(&who(1), CODE),
            Err(VerificationError::AlreadyVerified)
        );
        assert_eq!(
            g.service.request_verification(&who(1), PHONE).await,
            Err(VerificationError::AlreadyVerified)
        );
    }

    // =========================================================================
    // PHONE BINDING
    // =========================================================================

    #[tokio::test]
    async fn test_phone_bound_to_one_identity_at_a_time() {
        let g = gate();
        g.service.request_verification(&who(1), PHONE).await.unwrap();

        assert_eq!(
            g.service.request_verification(&who(2), PHONE).await,
            Err(VerificationError::PhoneConflict)
        );
        assert_eq!(g.service.session_state(&who(2)), SessionState::Unverified);

        // Once the first code lapses the phone is free again
        g.clock.advance(301);
        assert!(g.service.request_verification(&who(2), PHONE).await.is_ok());
    }

    #[tokio::test]
    async fn test_verification_releases_phone() {
        let g = gate();
        g.service.request_verification(&who(1), PHONE).await.unwrap();
        g.service.submit_otp(&who(1), CODE).unwrap();

        assert!(g.service.request_verification(&who(2), PHONE).await.is_ok());
    }

    #[tokio::test]
    async fn test_distinct_codes_per_issue() {
        let digits: Vec<u8> = "111111222222".bytes().map(|b| b - b'0').collect();
        let g = gate_with(config(), SequenceDigitSource::new(digits));
        g.service.request_verification(&who(1), PHONE).await.unwrap();
        g.service.request_verification(&who(1), PHONE).await.unwrap();

        // Re-issuing replaces the earlier code
        assert!(matches!(
            g.service.submit_otp(&who(1), "111111"),
            Err(VerificationError::Mismatch { .. })
        ));
        assert!(g.service.submit_otp(&who(1), "222222").is_ok());
    }

    // =========================================================================
    // EXPIRY
    // =========================================================================

    #[tokio::test]
    async fn test_code_accepted_at_deadline_then_expires() {
        let g = gate();
        g.service.request_verification(&who(1), PHONE).await.unwrap();
        g.service.request_verification(&who(2), "+15550000002").await.unwrap();

        g.clock.advance(300);
        assert!(g.service.submit_otp(&who(1), CODE).is_ok());

        g.clock.advance(1);
        assert_eq!(
            g.service.submit_otp(&who(2), CODE),
            Err(VerificationError::Expired)
        );
        assert!(matches!(
            g.service.session_state(&who(2)),
            SessionState::AwaitingOtp { .. }
        ));
    }

    // =========================================================================
    // DELIVERY FAILURE
    // =========================================================================

    #[tokio::test]
    async fn test_delivery_failure_rolls_back() {
        let g = gate();
        g.sms.failing.store(true, Ordering::SeqCst);

        let result = g.service.request_verification(&who(1), PHONE).await;
        assert!(matches!(result, Err(VerificationError::DeliveryFailed(_))));
        assert_eq!(g.service.session_state(&who(1)), SessionState::Unverified);
        assert_eq!(
            g.service.submit_otp(&who(1), CODE),
            Err(VerificationError::NotAwaitingOtp)
        );

        // The phone was not left bound to the failed attempt
        g.sms.failing.store(false, Ordering::SeqCst);
        assert!(g.service.request_verification(&who(2), PHONE).await.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_phone_reports_format() {
        let g = gate();
        let bad = ["5551234567", "+0123456789", "+12", "+1555abc4567"];
        for (id, raw) in (1u64..).zip(bad) {
            assert!(matches!(
                g.service.request_verification(&who(id), raw).await,
                Err(VerificationError::InvalidFormat(_))
            ));
        }
        assert_eq!(g.sms.sent(), 0);
    }
}
