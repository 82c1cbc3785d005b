//! RAG document management.
//!
//! Every mutating operation is followed by a mandatory re-list so the
//! cached set always reflects backend state — no optimistic local
//! mutation, trading an extra round trip for correctness. On failure the
//! cache stays at its last successfully fetched value.

use astra_core::document::{Document, DocumentBackend};
use astra_core::error::{AstraError, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Lists, uploads, and deletes the user's indexed documents.
pub struct DocumentService {
    backend: Arc<dyn DocumentBackend>,
    documents: RwLock<Vec<Document>>,
}

impl DocumentService {
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        Self {
            backend,
            documents: RwLock::new(Vec::new()),
        }
    }

    /// Fetches the user's documents, replacing the cached listing.
    pub async fn refresh(&self, user_id: &str) -> Result<usize> {
        let documents = self.backend.list_documents(user_id).await?;
        let count = documents.len();
        *self.documents.write().await = documents;
        Ok(count)
    }

    /// The cached listing.
    pub async fn documents(&self) -> Vec<Document> {
        self.documents.read().await.clone()
    }

    /// Uploads one file for indexing, then re-lists.
    ///
    /// Rejects client-side — no request sent — when no path was given. The
    /// file content is handed off as raw bytes; the backend owns parsing.
    pub async fn upload(&self, user_id: &str, path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(AstraError::NoFileSelected);
        }
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or(AstraError::NoFileSelected)?;
        let bytes = tokio::fs::read(path).await?;

        self.backend
            .upload_document(user_id, &filename, bytes)
            .await?;
        self.refresh(user_id).await?;
        Ok(())
    }

    /// Deletes one document, then re-lists.
    pub async fn delete(&self, user_id: &str, doc_id: &str) -> Result<()> {
        self.backend.delete_document(user_id, doc_id).await?;
        self.refresh(user_id).await?;
        Ok(())
    }
}
