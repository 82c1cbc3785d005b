//! Session repository trait.

use super::model::AuthSession;
use crate::error::Result;

/// An abstract store for the persisted session credential.
///
/// Decouples session lifecycle logic from the concrete storage mechanism
/// (a JSON file under the user config directory in the shipped client,
/// an in-memory map in tests).
pub trait SessionRepository: Send + Sync {
    /// Loads the persisted session, if any.
    ///
    /// A missing *or unreadable* session file yields `Ok(None)` — a
    /// corrupted credential pushes the user toward the sign-in flow rather
    /// than crashing the client.
    fn load(&self) -> Result<Option<AuthSession>>;

    /// Persists the session, replacing any previous one.
    fn save(&self, session: &AuthSession) -> Result<()>;

    /// Removes all persisted session state. Idempotent.
    fn clear(&self) -> Result<()>;
}
