//! Query orchestration.
//!
//! Routes a submitted query to the endpoint the active mode selects,
//! normalizes both response shapes into [`ResultPayload`], and persists the
//! exchange to history as a fire-and-forget background task. Persistence
//! failure never surfaces to the user and never rolls back the returned
//! result — at-most-once, best-effort semantics.

use crate::session_service::SessionService;
use astra_core::error::{AstraError, Result};
use astra_core::exchange::{
    AnalysisBackend, ChatHistoryBackend, QueryMode, RagResult, ResultPayload,
};
use std::sync::Arc;

/// Orchestrates query submission across the two analysis modes.
pub struct QueryService {
    analysis_backend: Arc<dyn AnalysisBackend>,
    history_backend: Arc<dyn ChatHistoryBackend>,
    session: Arc<SessionService>,
}

impl QueryService {
    pub fn new(
        analysis_backend: Arc<dyn AnalysisBackend>,
        history_backend: Arc<dyn ChatHistoryBackend>,
        session: Arc<SessionService>,
    ) -> Self {
        Self {
            analysis_backend,
            history_backend,
            session,
        }
    }

    /// Submits a query under the given mode.
    ///
    /// An empty or whitespace-only query is rejected before any request is
    /// sent. RAG mode additionally requires a derivable user id, since the
    /// backend scopes retrieval to the user's documents.
    ///
    /// Each call is independent: no de-duplication and no cancellation of
    /// in-flight submissions — the display layer decides which response
    /// wins (see `DashboardState`).
    pub async fn submit(&self, query: &str, mode: QueryMode) -> Result<ResultPayload> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AstraError::EmptyQuery);
        }

        let payload = match mode {
            QueryMode::Standard => {
                let result = self.analysis_backend.analyze(query).await?;
                ResultPayload::Standard(result)
            }
            QueryMode::Rag => {
                let user_id = self.session.require_user_id()?;
                let narrative = self.analysis_backend.rag_query(&user_id, query).await?;
                ResultPayload::Rag(RagResult { summary: narrative })
            }
        };

        self.spawn_persist(query.to_string(), payload.clone());

        Ok(payload)
    }

    /// Persists the exchange in the background. Skipped silently when no
    /// user id is derivable; failures are logged, not surfaced.
    fn spawn_persist(&self, query: String, payload: ResultPayload) {
        let Some(user_id) = self.session.user_id() else {
            tracing::debug!("skipping history persist: no signed-in user");
            return;
        };

        let history_backend = Arc::clone(&self.history_backend);
        tokio::spawn(async move {
            if let Err(err) = history_backend.save_chat(&user_id, &query, &payload).await {
                tracing::warn!("failed to persist exchange: {}", err.notification());
            }
        });
    }
}
