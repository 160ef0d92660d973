//! # Launch Token Flows
//!
//! A session mints a launch URL; the mini-app later presents it back for
//! verification. Tokens are checked against the identity the
//! mini-app believes it is serving.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{gate, Gate, CODE, DEPLOY_TOKEN, PHONE, START};
    use sg_03_launch_token::{
        Claims, DeployToken, LaunchTokenApi, LaunchTokenService, TokenConfig, TokenRejection,
        HASH, SESSION, USER,
    };
    use sg_04_verification::VerificationApi;
    use shared_types::{Identity, MockTimeSource};
    use std::sync::Arc;

    async fn verified(g: &Gate, id: &Identity) {
        g.service.request_verification(id, PHONE).await.unwrap();
        g.service.submit_otp(id, CODE).unwrap();
    }

    #[tokio::test]
    async fn test_launch_url_round_trip() {
        let g = gate();
        let id = Identity::from(42u64);
        verified(&g, &id).await;

        let url = g.service.mint_launch_url(&id);
        let (base, token) = url.split_once('?').unwrap();
        assert_eq!(base, "http://localhost:8080/webapp");

        let claims = Claims::parse(token).unwrap();
        assert_eq!(claims.get(USER), Some("42"));
        assert_eq!(claims.get(SESSION).map(str::len), Some(16));
        assert_eq!(claims.get(HASH).map(str::len), Some(64));

        assert!(g.service.verify_launch_token(&url, &id).is_valid());
        assert!(g.service.verify_launch_token(token, &id).is_valid());
    }

    #[tokio::test]
    async fn test_token_goes_stale_after_freshness_window() {
        let g = gate();
        let id = Identity::from(42u64);
        verified(&g, &id).await;
        let token = g.service.mint_launch_token(&id);

        g.clock.advance(300);
        assert!(g.service.verify_launch_token(&token, &id).is_valid());

        g.clock.advance(1);
        assert_eq!(
            g.service.verify_launch_token(&token, &id).reason,
            Some(TokenRejection::Stale)
        );
    }

    #[tokio::test]
    async fn test_unverified_identity_can_mint() {
        let g = gate();
        let id = Identity::from(9u64);

        // Never seen: the launch URL is the entry point into verification
        let url = g.service.mint_launch_url(&id);
        assert!(g.service.verify_launch_token(&url, &id).is_valid());
        assert!(!g.service.is_verified(&id));

        g.service.request_verification(&id, PHONE).await.unwrap();
        let token = g.service.mint_launch_token(&id);
        assert!(g.service.verify_launch_token(&token, &id).is_valid());
        assert!(!g.service.is_verified(&id));
    }

    #[tokio::test]
    async fn test_token_bound_to_identity() {
        let g = gate();
        let alice = Identity::from(1u64);
        verified(&g, &alice).await;
        let token = g.service.mint_launch_token(&alice);

        assert_eq!(
            g.service
                .verify_launch_token(&token, &Identity::from(2u64))
                .reason,
            Some(TokenRejection::IdentityMismatch)
        );

        // Rewriting the user claim cannot carry the session claim along
        let forged = token.replacen("user=1&", "user=2&", 1);
        assert_eq!(
            g.service
                .verify_launch_token(&forged, &Identity::from(2u64))
                .reason,
            Some(TokenRejection::SessionMismatch)
        );
    }

    #[tokio::test]
    async fn test_standalone_verifier_shares_deploy_token() {
        let g = gate();
        let id = Identity::from(42u64);
        verified(&g, &id).await;
        let token = g.service.mint_launch_token(&id);

        // A separate process holding the same deploy token accepts it
        let clock = Arc::new(MockTimeSource::new(START + 60));
        let same = LaunchTokenService::new(
            &DeployToken::new(DEPLOY_TOKEN).unwrap(),
            TokenConfig::default(),
            Arc::clone(&clock),
        )
        .unwrap();
        assert!(same.verify(&token, &id).is_valid());

        let other = LaunchTokenService::new(
            &DeployToken::new("654321:other-deployment").unwrap(),
            TokenConfig::default(),
            clock,
        )
        .unwrap();
        assert_eq!(
            other.verify(&token, &id).reason,
            Some(TokenRejection::SessionMismatch)
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        let g = gate();
        let id = Identity::from(42u64);
        for raw in ["", "   ", "not a token", "user=42&user=42", "user=42&hash=00"] {
            assert_eq!(
                g.service.verify_launch_token(raw, &id).reason,
                Some(TokenRejection::Malformed),
                "{raw:?}"
            );
        }
    }
}
