//! Exchange history listing and replay.
//!
//! Keeps the last fetched listing in memory so selecting a past exchange is
//! a pure local projection — replay never re-queries the analysis
//! endpoints. Deletion is confirmation-gated and updates the in-memory
//! list without a re-fetch on success.

use astra_core::error::Result;
use astra_core::exchange::{ChatHistoryBackend, QueryExchange};
use std::sync::Arc;
use tokio::sync::RwLock;

/// What a confirmation-gated delete did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The backend call was issued and succeeded.
    Deleted,
    /// The user declined; nothing was sent.
    Declined,
}

/// Lists past exchanges and replays their stored results.
pub struct HistoryService {
    backend: Arc<dyn ChatHistoryBackend>,
    entries: RwLock<Vec<QueryExchange>>,
}

impl HistoryService {
    pub fn new(backend: Arc<dyn ChatHistoryBackend>) -> Self {
        Self {
            backend,
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Fetches the user's history, replacing the cached listing. Order is
    /// whatever the backend returned.
    pub async fn refresh(&self, user_id: &str) -> Result<usize> {
        let history = self.backend.get_chats(user_id).await?;
        let count = history.len();
        *self.entries.write().await = history;
        Ok(count)
    }

    /// The cached listing.
    pub async fn entries(&self) -> Vec<QueryExchange> {
        self.entries.read().await.clone()
    }

    /// Selects an entry from the cached listing by position.
    ///
    /// Pure local projection: no network call. The caller routes the
    /// entry's stored payload into the dashboard display slot; the widget
    /// set follows the payload's mode.
    pub async fn select(&self, index: usize) -> Option<QueryExchange> {
        self.entries.read().await.get(index).cloned()
    }

    /// Deletes an exchange, gated on an explicit user confirmation.
    ///
    /// When `confirmed` is false nothing is sent and the listing is
    /// untouched. On backend failure the listing is also untouched; on
    /// success the entry is dropped from the cached listing without a
    /// re-fetch.
    pub async fn delete(&self, chat_id: &str, confirmed: bool) -> Result<DeleteOutcome> {
        if !confirmed {
            return Ok(DeleteOutcome::Declined);
        }

        self.backend.delete_chat(chat_id).await?;
        self.entries
            .write()
            .await
            .retain(|exchange| exchange.id != chat_id);
        Ok(DeleteOutcome::Deleted)
    }
}
