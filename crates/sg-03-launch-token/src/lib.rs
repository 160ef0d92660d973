//! # Launch Token Subsystem (SG-03)
//!
//! Signs and verifies the flat `key=value&...` token handed to the embedded
//! mini-app so it can trust an identity without calling back.
//!
//! ## Construction
//!
//! 1. `secret_key = HMAC-SHA256(key = "WebAppData", msg = deploy_token)`
//! 2. `check_string` = every claim except `hash` as `name=value`, sorted by
//!    name, joined with `\n`
//! 3. `hash = hex(HMAC-SHA256(key = secret_key, msg = check_string))`
//!
//! The `session` claim is `hex(HMAC-SHA256(key = deploy_token, msg = user))`
//! truncated to a fixed prefix, so it is bound to both identity and deploy
//! token without any randomness.
//!
//! ## Verification Order
//!
//! 1. Parse (duplicate keys or a pair without `=` are malformed)
//! 2. Required claims present: `user`, `auth_date`, `session`, `hash`
//! 3. `user` equals the expected identity
//! 4. `session` equals the recomputed session claim
//! 5. `auth_date` within the freshness window
//! 6. `hash` equals the recomputed signature (constant time)

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::claims::{Claims, AUTH_DATE, HASH, SESSION, START_PARAM, USER};
pub use domain::config::TokenConfig;
pub use domain::errors::TokenError;
pub use domain::secret::DeployToken;
pub use domain::signature::TokenKeys;
pub use domain::verdict::{TokenRejection, TokenVerdict};
pub use ports::inbound::LaunchTokenApi;
pub use service::LaunchTokenService;
