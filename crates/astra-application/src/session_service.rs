//! Session lifecycle service.
//!
//! The single writer of session state. Every component that needs identity
//! receives this service by `Arc` — the token is never read from ambient
//! global state. Identity is re-derived from the persisted token on every
//! read, so a corrupted or replaced token yields an absent identity rather
//! than a stale one.

use astra_core::error::{AstraError, Result};
use astra_core::router::SessionState;
use astra_core::session::{AuthBackend, AuthSession, SessionRepository, decode_claims};
use std::sync::Arc;

/// Owns the authentication token lifecycle and derives the current user
/// identity from it.
pub struct SessionService {
    repository: Arc<dyn SessionRepository>,
    auth_backend: Arc<dyn AuthBackend>,
}

impl SessionService {
    pub fn new(repository: Arc<dyn SessionRepository>, auth_backend: Arc<dyn AuthBackend>) -> Self {
        Self {
            repository,
            auth_backend,
        }
    }

    /// The persisted session, if any.
    ///
    /// Storage failures are logged and reported as "no session" — callers
    /// must treat absent as unauthenticated, never crash the view.
    pub fn session(&self) -> Option<AuthSession> {
        match self.repository.load() {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!("failed to load session: {}", err);
                None
            }
        }
    }

    /// The stored bearer token, if signed in.
    pub fn token(&self) -> Option<String> {
        self.session().map(|session| session.token)
    }

    /// The display username stored at login.
    pub fn username(&self) -> Option<String> {
        self.session().map(|session| session.username)
    }

    /// The user identifier decoded from the stored token's payload.
    ///
    /// Absent when there is no token or the token does not decode; this is
    /// the unauthenticated signal, not an error.
    pub fn user_id(&self) -> Option<String> {
        let token = self.token()?;
        decode_claims(&token).map(|claims| claims.user_id)
    }

    /// The identifier, or `NotAuthenticated` for operations that cannot
    /// proceed anonymously.
    pub fn require_user_id(&self) -> Result<String> {
        self.user_id().ok_or(AstraError::NotAuthenticated)
    }

    /// Session presence as the view router sees it.
    pub fn session_state(&self) -> SessionState {
        if self.session().is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        }
    }

    /// Creates an account. Does not sign in; returns the backend's ack.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<String> {
        self.auth_backend.register(username, email, password).await
    }

    /// Exchanges credentials for a token and persists the session.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
        let outcome = self.auth_backend.login(email, password).await?;
        let session = AuthSession::new(outcome.access_token, outcome.username);
        self.repository.save(&session)?;
        tracing::info!("signed in as {}", session.username);
        Ok(session)
    }

    /// Removes all session state. Idempotent; the router treats the session
    /// as terminated afterwards.
    pub fn logout(&self) -> Result<()> {
        self.repository.clear()?;
        tracing::info!("signed out");
        Ok(())
    }
}
