//! Persistent session credential storage.
//!
//! Stores the bearer token and display username as JSON under the user
//! config directory, the client-side equivalent of the browser's
//! localStorage entries. The file is rewritten atomically and restricted
//! to the owning user on Unix.

use crate::paths::AstraPaths;
use astra_core::error::{AstraError, Result};
use astra_core::session::{AuthSession, SessionRepository};
use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::PathBuf;

/// File-backed implementation of [`SessionRepository`].
///
/// Responsibilities:
/// - Load session.json from the config directory
/// - Persist the session atomically (tmp file + rename)
/// - Remove the file on logout
///
/// Does NOT:
/// - Validate the token (the backend is the sole validator)
/// - Cache anything in memory (every load re-reads the file, so a
///   corrupted token surfaces as an absent session on the next read)
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    /// Creates storage at the default path (`~/.config/astra/session.json`).
    pub fn new() -> Result<Self> {
        let path = AstraPaths::session_file()
            .map_err(|err| AstraError::config(err.to_string()))?;
        Ok(Self { path })
    }

    /// Creates storage at a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the path to the session file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SessionRepository for FileSessionStorage {
    fn load(&self) -> Result<Option<AuthSession>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        match serde_json::from_str(&content) {
            Ok(session) => Ok(Some(session)),
            Err(err) => {
                // A mangled session file means signing in again, not a crash.
                tracing::warn!(
                    "ignoring unreadable session file {}: {}",
                    self.path.display(),
                    err
                );
                Ok(None)
            }
        }
    }

    fn save(&self, session: &AuthSession) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(session)?;

        // Write to a temporary file in the same directory, then rename.
        let tmp_path = self.path.with_extension("json.tmp");
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(json.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o600))?;
        }

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage_in(temp_dir: &TempDir) -> FileSessionStorage {
        FileSessionStorage::with_path(temp_dir.path().join("session.json"))
    }

    #[test]
    fn test_load_missing_file_is_absent() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage_in(&temp_dir);
        assert_eq!(storage.load().unwrap(), None);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage_in(&temp_dir);

        let session = AuthSession::new("tok.en.sig", "casey");
        storage.save(&session).unwrap();

        assert_eq!(storage.load().unwrap(), Some(session));

        // No temp file left behind
        assert!(!temp_dir.path().join("session.json.tmp").exists());
    }

    #[test]
    fn test_corrupted_file_is_absent_not_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage_in(&temp_dir);

        fs::write(storage.path(), "{ not json").unwrap();
        assert_eq!(storage.load().unwrap(), None);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage_in(&temp_dir);

        storage.save(&AuthSession::new("t", "u")).unwrap();
        storage.clear().unwrap();
        assert_eq!(storage.load().unwrap(), None);

        // Clearing again is a no-op, not an error.
        storage.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let storage = storage_in(&temp_dir);
        storage.save(&AuthSession::new("t", "u")).unwrap();

        let mode = fs::metadata(storage.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
