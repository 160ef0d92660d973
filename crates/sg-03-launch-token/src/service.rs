//! # Launch Token Service
//!
//! Holds the derived keys and the injected clock. Stateless apart from
//! the freshness check.

use crate::domain::config::TokenConfig;
use crate::domain::errors::TokenError;
use crate::domain::secret::DeployToken;
use crate::domain::signature::TokenKeys;
use crate::domain::verdict::TokenVerdict;
use crate::ports::inbound::LaunchTokenApi;
use shared_types::{Identity, TimeSource};
use tracing::{debug, warn};

#[derive(Debug)]
pub struct LaunchTokenService<T: TimeSource> {
    config: TokenConfig,
    keys: TokenKeys,
    clock: T,
}

impl<T: TimeSource> LaunchTokenService<T> {
    pub fn new(
        deploy_token: &DeployToken,
        config: TokenConfig,
        clock: T,
    ) -> Result<Self, TokenError> {
        Ok(Self {
            config,
            keys: TokenKeys::derive(deploy_token)?,
            clock,
        })
    }

    pub fn config(&self) -> &TokenConfig {
        &self.config
    }
}

impl<T: TimeSource> LaunchTokenApi for LaunchTokenService<T> {
    fn mint(&self, identity: &Identity) -> String {
        let token = self
            .keys
            .mint(identity, self.clock.now(), &self.config)
            .encode();
        debug!(identity = %identity, "Minted launch token");
        token
    }

    fn verify(&self, raw: &str, expected: &Identity) -> TokenVerdict {
        let verdict: TokenVerdict = self
            .keys
            .check(raw, expected, self.clock.now(), &self.config)
            .into();
        if let Some(reason) = verdict.reason {
            warn!(identity = %expected, reason = reason.as_str(), "Launch token rejected");
        }
        verdict
    }
}
