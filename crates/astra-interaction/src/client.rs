//! HTTP client for the intelligence backend.
//!
//! One client implements every backend trait; the application layer only
//! sees the trait objects. Errors are normalized at this boundary: non-2xx
//! responses become `AstraError::Backend` carrying the backend's `detail`
//! message when the body provides one, transport failures become
//! `AstraError::Network`.

use crate::dto::{
    AnalyzeRequest, AnalyzeResponse, ChatHistoryResponse, DocumentsResponse, ErrorBody,
    LoginRequest, LoginResponse, MessageResponse, RagQueryResponse, RegisterRequest,
    SaveChatRequest,
};
use astra_core::config::BackendConfig;
use astra_core::document::{Document, DocumentBackend};
use astra_core::error::{AstraError, Result};
use astra_core::exchange::{
    AnalysisBackend, ChatHistoryBackend, QueryExchange, ResultPayload, StandardResult,
};
use astra_core::session::{AuthBackend, LoginOutcome};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use std::time::Duration;

/// Timeout for short bookkeeping calls (auth, history, listings).
const SHORT_TIMEOUT: Duration = Duration::from_secs(30);
/// Timeout for the best-effort persistence call.
const SAVE_TIMEOUT: Duration = Duration::from_secs(10);
/// Timeout for document uploads.
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// REST client for the backend HTTP surface.
#[derive(Clone)]
pub struct HttpBackendClient {
    client: Client,
    base_url: String,
    /// Analysis calls fan out to research agents server-side and can run
    /// much longer than the bookkeeping endpoints.
    analysis_timeout: Duration,
}

impl HttpBackendClient {
    /// Creates a client against the configured backend.
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            analysis_timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Converts a non-success response into a backend error, extracting the
    /// FastAPI `detail` field when the body carries one.
    async fn error_from(response: Response) -> AstraError {
        let status = response.status().as_u16();
        let message = match response.text().await {
            Ok(body) => serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .map(|parsed| parsed.detail)
                .filter(|detail| !detail.is_empty())
                .unwrap_or_else(|| {
                    if body.trim().is_empty() {
                        "backend request failed".to_string()
                    } else {
                        body
                    }
                }),
            Err(_) => "backend request failed".to_string(),
        };
        AstraError::backend(status, message)
    }

    async fn ensure_success(response: Response) -> Result<Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::error_from(response).await)
        }
    }
}

#[async_trait]
impl AuthBackend for HttpBackendClient {
    async fn register(&self, username: &str, email: &str, password: &str) -> Result<String> {
        let response = self
            .client
            .post(self.url("/register"))
            .json(&RegisterRequest {
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            })
            .timeout(SHORT_TIMEOUT)
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;

        let body: MessageResponse = response.json().await?;
        Ok(body.message)
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome> {
        let response = self
            .client
            .post(self.url("/login"))
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .timeout(SHORT_TIMEOUT)
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;

        let body: LoginResponse = response.json().await?;
        Ok(LoginOutcome {
            message: body.message,
            access_token: body.access_token,
            username: body.username,
        })
    }
}

#[async_trait]
impl AnalysisBackend for HttpBackendClient {
    async fn analyze(&self, query: &str) -> Result<StandardResult> {
        tracing::debug!("dispatching standard analysis ({} chars)", query.len());
        let response = self
            .client
            .post(self.url("/analyze"))
            .json(&AnalyzeRequest {
                query: query.to_string(),
            })
            .timeout(self.analysis_timeout)
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;

        let body: AnalyzeResponse = response.json().await?;
        Ok(body.team_b)
    }

    async fn rag_query(&self, user_id: &str, query: &str) -> Result<String> {
        tracing::debug!("dispatching rag query for user {user_id}");
        let form = Form::new()
            .text("user_id", user_id.to_string())
            .text("query", query.to_string());

        let response = self
            .client
            .post(self.url("/rag/query"))
            .multipart(form)
            .timeout(self.analysis_timeout)
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;

        let body: RagQueryResponse = response.json().await?;
        Ok(body.response)
    }
}

#[async_trait]
impl ChatHistoryBackend for HttpBackendClient {
    async fn save_chat(
        &self,
        user_id: &str,
        query: &str,
        response: &ResultPayload,
    ) -> Result<()> {
        let http_response = self
            .client
            .post(self.url("/save_chat"))
            .json(&SaveChatRequest {
                user_id: user_id.to_string(),
                query: query.to_string(),
                response: response.clone(),
            })
            .timeout(SAVE_TIMEOUT)
            .send()
            .await?;
        Self::ensure_success(http_response).await?;
        Ok(())
    }

    async fn get_chats(&self, user_id: &str) -> Result<Vec<QueryExchange>> {
        let response = self
            .client
            .get(self.url(&format!("/get_chats/{user_id}")))
            .timeout(SHORT_TIMEOUT)
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;

        let body: ChatHistoryResponse = response.json().await?;
        Ok(body.history)
    }

    async fn delete_chat(&self, chat_id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/delete_chat/{chat_id}")))
            .timeout(SHORT_TIMEOUT)
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentBackend for HttpBackendClient {
    async fn list_documents(&self, user_id: &str) -> Result<Vec<Document>> {
        let response = self
            .client
            .get(self.url("/rag/documents"))
            .query(&[("user_id", user_id)])
            .timeout(SHORT_TIMEOUT)
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;

        let body: DocumentsResponse = response.json().await?;
        Ok(body.documents)
    }

    async fn upload_document(&self, user_id: &str, filename: &str, bytes: Vec<u8>) -> Result<()> {
        let part = Part::bytes(bytes).file_name(filename.to_string());
        let form = Form::new()
            .text("user_id", user_id.to_string())
            .part("file", part);

        let response = self
            .client
            .post(self.url("/upload-document"))
            .multipart(form)
            .timeout(UPLOAD_TIMEOUT)
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn delete_document(&self, user_id: &str, doc_id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/rag/delete-document/{user_id}/{doc_id}")))
            .timeout(SHORT_TIMEOUT)
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> HttpBackendClient {
        HttpBackendClient::new(&BackendConfig {
            base_url: "http://127.0.0.1:8000/".to_string(),
            timeout_secs: 5,
        })
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = client();
        assert_eq!(client.url("/analyze"), "http://127.0.0.1:8000/analyze");
        assert_eq!(
            client.url("/get_chats/u-1"),
            "http://127.0.0.1:8000/get_chats/u-1"
        );
    }
}
