//! Screen routing against session presence.
//!
//! Two states, two transitions: a session appearing (login) moves the
//! client to `Authenticated`, a session clearing (logout) moves it back.
//! The check is synchronous against local session presence only — the
//! backend re-validates the token on every request it receives, so the
//! router never phones home.

use serde::{Deserialize, Serialize};

/// The screens the client can present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    /// Unauthenticated entry point: sign-in / sign-up.
    Login,
    /// Query panel, result widgets, history.
    Dashboard,
    /// RAG document management.
    Documents,
}

impl Screen {
    /// Whether reaching this screen requires a session.
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login)
    }
}

/// Presence of a session, as seen by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
}

/// Resolves a navigation request: protected screens redirect to the
/// unauthenticated entry point when no session is present.
pub fn resolve(requested: Screen, state: SessionState) -> Screen {
    match state {
        SessionState::Authenticated => requested,
        SessionState::Unauthenticated if requested.requires_auth() => Screen::Login,
        SessionState::Unauthenticated => requested,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_screens_redirect_when_unauthenticated() {
        assert_eq!(
            resolve(Screen::Dashboard, SessionState::Unauthenticated),
            Screen::Login
        );
        assert_eq!(
            resolve(Screen::Documents, SessionState::Unauthenticated),
            Screen::Login
        );
    }

    #[test]
    fn test_login_reachable_in_both_states() {
        assert_eq!(
            resolve(Screen::Login, SessionState::Unauthenticated),
            Screen::Login
        );
        assert_eq!(
            resolve(Screen::Login, SessionState::Authenticated),
            Screen::Login
        );
    }

    #[test]
    fn test_authenticated_reaches_everything() {
        for screen in [Screen::Login, Screen::Dashboard, Screen::Documents] {
            assert_eq!(resolve(screen, SessionState::Authenticated), screen);
        }
    }
}
