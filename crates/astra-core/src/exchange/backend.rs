//! Backend traits for analysis and chat history.
//!
//! The HTTP surface is the given external interface; these traits are the
//! seam that lets the application layer run against it, and lets tests run
//! against recording mocks instead of a live service.

use super::model::QueryExchange;
use super::payload::{ResultPayload, StandardResult};
use crate::error::Result;
use async_trait::async_trait;

/// Query-analysis operations.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Runs the standard multi-agent market analysis for a query.
    async fn analyze(&self, query: &str) -> Result<StandardResult>;

    /// Answers a query from the user's indexed documents. Returns the raw
    /// narrative string; the orchestrator wraps it into a payload.
    async fn rag_query(&self, user_id: &str, query: &str) -> Result<String>;
}

/// Persistence and retrieval of a user's exchange history.
#[async_trait]
pub trait ChatHistoryBackend: Send + Sync {
    /// Persists one exchange. Best-effort from the caller's perspective.
    async fn save_chat(
        &self,
        user_id: &str,
        query: &str,
        response: &ResultPayload,
    ) -> Result<()>;

    /// Lists a user's exchanges in the order the backend returns them.
    async fn get_chats(&self, user_id: &str) -> Result<Vec<QueryExchange>>;

    /// Deletes one exchange by id.
    async fn delete_chat(&self, chat_id: &str) -> Result<()>;
}
