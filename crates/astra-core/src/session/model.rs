//! Session domain model.

use serde::{Deserialize, Serialize};

/// The client-side record of a signed-in user.
///
/// Holds exactly what the login endpoint returned: the opaque bearer token
/// and the display username. The user identifier is *derived* from the
/// token's payload on demand (see [`super::claims`]) and is intentionally
/// never stored, so a corrupted or replaced token can never produce a stale
/// identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Opaque bearer credential issued by the backend.
    pub token: String,
    /// Display name returned alongside the token.
    pub username: String,
}

impl AuthSession {
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
        }
    }
}
