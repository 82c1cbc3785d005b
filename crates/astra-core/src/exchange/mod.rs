//! Exchange domain: queries, their results, and history access.

pub mod backend;
pub mod model;
pub mod payload;

pub use backend::{AnalysisBackend, ChatHistoryBackend};
pub use model::QueryExchange;
pub use payload::{
    CompetitorTrend, EventSpikes, MarketEvent, MarketTrend, RagResult, ResultPayload, Sentiment,
    SocialTrend, StandardResult, TrendSeries, TrendSeriesSet,
};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which analysis path a query is submitted to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum QueryMode {
    /// Live market analysis across the research agents.
    #[default]
    Standard,
    /// Retrieval-augmented answer from the user's uploaded documents.
    Rag,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_mode_parses_case_insensitively() {
        assert_eq!(QueryMode::from_str("rag").unwrap(), QueryMode::Rag);
        assert_eq!(QueryMode::from_str("RAG").unwrap(), QueryMode::Rag);
        assert_eq!(
            QueryMode::from_str("standard").unwrap(),
            QueryMode::Standard
        );
        assert!(QueryMode::from_str("hybrid").is_err());
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(QueryMode::Standard.to_string(), "standard");
        assert_eq!(QueryMode::Rag.to_string(), "rag");
    }
}
