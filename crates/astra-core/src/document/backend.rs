//! Document backend trait.

use super::model::Document;
use crate::error::Result;
use async_trait::async_trait;

/// Operations on a user's RAG document set.
///
/// Uploads hand off raw bytes; the backend owns parsing and indexing.
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// Lists the user's indexed documents.
    async fn list_documents(&self, user_id: &str) -> Result<Vec<Document>>;

    /// Uploads one file for indexing.
    async fn upload_document(&self, user_id: &str, filename: &str, bytes: Vec<u8>) -> Result<()>;

    /// Removes one document from the user's index.
    async fn delete_document(&self, user_id: &str, doc_id: &str) -> Result<()>;
}
