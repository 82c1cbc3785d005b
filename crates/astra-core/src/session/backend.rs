//! Authentication backend trait.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// What a successful login returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginOutcome {
    /// Human-readable ack from the backend.
    pub message: String,
    /// Bearer token for subsequent identity derivation.
    pub access_token: String,
    /// Display name to persist alongside the token.
    pub username: String,
}

/// Account operations on the intelligence backend.
///
/// Token issuance and credential validation are entirely the backend's
/// responsibility; the client only relays credentials and stores what
/// comes back.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Creates an account. Returns the backend's ack message.
    ///
    /// Registration does not sign the user in; the browser flow required a
    /// subsequent login and this client keeps that behavior.
    async fn register(&self, username: &str, email: &str, password: &str) -> Result<String>;

    /// Exchanges credentials for a bearer token.
    async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome>;
}
