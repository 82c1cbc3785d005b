//! Exchange domain model.

use super::payload::ResultPayload;
use serde::{Deserialize, Serialize};

/// One persisted query/response pair in a user's history.
///
/// Owned by the backend; the client only ever holds a re-fetchable copy.
/// The identifier is backend-assigned (`_id` on the wire, a document-store
/// id) and only present once the exchange has been persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryExchange {
    /// Backend-assigned identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Owning user.
    #[serde(default)]
    pub user_id: String,
    /// The submitted query text.
    pub query: String,
    /// The analysis result, opaque to the backend.
    pub response: ResultPayload,
    /// Backend-assigned creation time, kept in the backend's string form.
    #[serde(default)]
    pub timestamp: String,
}

impl QueryExchange {
    /// Timestamp formatted for list display.
    ///
    /// The backend emits RFC 3339; anything else is shown as-is rather than
    /// failing the listing.
    pub fn display_timestamp(&self) -> String {
        chrono::DateTime::parse_from_rfc3339(&self.timestamp)
            .map(|parsed| parsed.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|_| self.timestamp.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::payload::RagResult;

    fn exchange(timestamp: &str) -> QueryExchange {
        QueryExchange {
            id: "65f0c0ffee".to_string(),
            user_id: "u-1".to_string(),
            query: "who leads the CDN market?".to_string(),
            response: ResultPayload::Rag(RagResult {
                summary: "…".to_string(),
            }),
            timestamp: timestamp.to_string(),
        }
    }

    #[test]
    fn test_wire_id_field() {
        let json = serde_json::to_value(exchange("2025-06-01T09:30:00+00:00")).unwrap();
        assert!(json.get("_id").is_some());
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_display_timestamp_formats_rfc3339() {
        let exchange = exchange("2025-06-01T09:30:00+00:00");
        assert_eq!(exchange.display_timestamp(), "2025-06-01 09:30");
    }

    #[test]
    fn test_display_timestamp_falls_back_to_raw() {
        let exchange = exchange("last tuesday");
        assert_eq!(exchange.display_timestamp(), "last tuesday");
    }
}
