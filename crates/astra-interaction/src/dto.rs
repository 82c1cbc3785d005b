//! Wire DTOs for the backend HTTP surface.
//!
//! Request/response bodies exactly as the backend speaks them. Domain
//! payload shapes (`StandardResult`, `ResultPayload`, `QueryExchange`,
//! `Document`) serialize directly, so only the envelopes live here.

use astra_core::document::Document;
use astra_core::exchange::{QueryExchange, ResultPayload, StandardResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: String,
    pub access_token: String,
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeRequest {
    pub query: String,
}

/// The analysis pipeline nests its output under the research-team key.
#[derive(Debug, Deserialize)]
pub struct AnalyzeResponse {
    pub team_b: StandardResult,
}

#[derive(Debug, Deserialize)]
pub struct RagQueryResponse {
    #[serde(default)]
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct SaveChatRequest {
    pub user_id: String,
    pub query: String,
    pub response: ResultPayload,
}

#[derive(Debug, Deserialize)]
pub struct ChatHistoryResponse {
    #[serde(default)]
    pub history: Vec<QueryExchange>,
}

#[derive(Debug, Deserialize)]
pub struct DocumentsResponse {
    #[serde(default)]
    pub documents: Vec<Document>,
}

/// FastAPI-style error body.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use astra_core::exchange::QueryMode;

    #[test]
    fn test_analyze_response_unwraps_team() {
        let body = r#"{
            "team_b": {
                "summary": "S",
                "market_insights": "M",
                "social_trends": [],
                "competitor_trend": {"timeseries": {"x": [], "series": []}},
                "market_trend": {"sector_performance": {"x": [], "series": []}},
                "event_spikes": {"events_detected": []}
            }
        }"#;
        let parsed: AnalyzeResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.team_b.summary, "S");
        assert_eq!(parsed.team_b.market_insights, "M");
    }

    #[test]
    fn test_login_response() {
        let body = r#"{"message": "Login successful", "access_token": "a.b.c", "username": "casey"}"#;
        let parsed: LoginResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.access_token, "a.b.c");
        assert_eq!(parsed.username, "casey");
    }

    #[test]
    fn test_history_response_parses_entries() {
        let body = r#"{
            "history": [{
                "_id": "65f0",
                "user_id": "u-1",
                "query": "cdn market",
                "response": {"summary": "narrative"},
                "timestamp": "2025-06-01T09:30:00+00:00"
            }]
        }"#;
        let parsed: ChatHistoryResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.history.len(), 1);
        assert_eq!(parsed.history[0].id, "65f0");
        // Untagged stored blob with only a summary infers RAG.
        assert_eq!(parsed.history[0].response.mode(), QueryMode::Rag);
    }

    #[test]
    fn test_error_body_detail() {
        let parsed: ErrorBody =
            serde_json::from_str(r#"{"detail": "Invalid credentials"}"#).unwrap();
        assert_eq!(parsed.detail, "Invalid credentials");
    }
}
