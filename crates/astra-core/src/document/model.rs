//! Document domain model.

use serde::{Deserialize, Serialize};

/// One document indexed for retrieval-augmented queries.
///
/// Created by upload, destroyed by explicit delete; the client never
/// interprets the content, only the listing metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Backend-assigned identifier.
    pub id: String,
    #[serde(default)]
    pub metadata: DocumentMetadata,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Original filename, when the indexer recorded one.
    #[serde(default)]
    pub filename: Option<String>,
}

impl Document {
    /// Name shown in listings: the filename when present, the id otherwise.
    pub fn display_name(&self) -> &str {
        self.metadata.filename.as_deref().unwrap_or(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_filename() {
        let document = Document {
            id: "doc-1".to_string(),
            metadata: DocumentMetadata {
                filename: Some("q3-earnings.pdf".to_string()),
            },
        };
        assert_eq!(document.display_name(), "q3-earnings.pdf");
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let document: Document = serde_json::from_str(r#"{"id": "doc-2"}"#).unwrap();
        assert_eq!(document.display_name(), "doc-2");
    }
}
