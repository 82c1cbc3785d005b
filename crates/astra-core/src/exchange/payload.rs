//! Analysis result payloads.
//!
//! A query produces one of two payload shapes depending on the mode it was
//! submitted under: the multi-widget market analysis, or the single
//! narrative a retrieval-augmented query returns. The union is serialized
//! with an explicit `mode` tag so replayed history knows which widget set
//! to render; untagged blobs written by older clients are still accepted
//! via shape inference.
//!
//! The widget sub-shapes follow what the backend's research agents emit.
//! They are deliberately lenient: every field defaults, unknown fields are
//! ignored.

use crate::exchange::QueryMode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fields only a standard analysis produces. Used to infer the mode of
/// legacy payloads that were persisted without a `mode` tag.
const STANDARD_FIELDS: [&str; 5] = [
    "market_insights",
    "social_trends",
    "competitor_trend",
    "market_trend",
    "event_spikes",
];

/// The response half of an exchange.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ResultPayload {
    /// Multi-widget market analysis.
    Standard(StandardResult),
    /// Narrative answer grounded in the user's uploaded documents.
    Rag(RagResult),
}

impl ResultPayload {
    /// The mode that produced (or is inferred to have produced) this payload.
    pub fn mode(&self) -> QueryMode {
        match self {
            Self::Standard(_) => QueryMode::Standard,
            Self::Rag(_) => QueryMode::Rag,
        }
    }

    /// The narrative summary common to both shapes.
    pub fn summary(&self) -> &str {
        match self {
            Self::Standard(result) => &result.summary,
            Self::Rag(result) => &result.summary,
        }
    }

    /// Parses a payload from its JSON form.
    ///
    /// A `mode` tag decides the shape when present. Legacy blobs carry no
    /// tag; those are treated as Standard when any widget field only a
    /// standard analysis produces is present, and as Rag otherwise.
    pub fn from_value(value: serde_json::Value) -> Result<Self, String> {
        let Some(object) = value.as_object() else {
            return Err("result payload must be a JSON object".to_string());
        };
        let standard = match object.get("mode").and_then(|mode| mode.as_str()) {
            Some("standard") => true,
            Some("rag") => false,
            Some(other) => return Err(format!("unknown result mode '{other}'")),
            None => STANDARD_FIELDS.iter().any(|field| object.contains_key(*field)),
        };
        if standard {
            serde_json::from_value(value)
                .map(Self::Standard)
                .map_err(|err| err.to_string())
        } else {
            serde_json::from_value(value)
                .map(Self::Rag)
                .map_err(|err| err.to_string())
        }
    }
}

impl<'de> Deserialize<'de> for ResultPayload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}

/// The multi-widget market-analysis response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StandardResult {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub market_insights: String,
    #[serde(default)]
    pub social_trends: Vec<SocialTrend>,
    #[serde(default)]
    pub competitor_trend: CompetitorTrend,
    #[serde(default)]
    pub market_trend: MarketTrend,
    #[serde(default)]
    pub event_spikes: EventSpikes,
    /// Raw source excerpts the scraper agent collected. Loosely shaped
    /// upstream, so kept as JSON and only shown in verbose rendering.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data_scraper_docs: Vec<serde_json::Value>,
}

/// Narrative answer from the retrieval-augmented mode.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RagResult {
    #[serde(default)]
    pub summary: String,
}

/// One social-listening trend line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialTrend {
    #[serde(default)]
    pub trend: String,
    #[serde(default)]
    pub sentiment: Sentiment,
}

/// Sentiment attached to a social trend. Unknown values collapse to
/// neutral rather than failing the whole payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl From<String> for Sentiment {
    fn from(value: String) -> Self {
        match value.as_str() {
            "positive" => Self::Positive,
            "negative" => Self::Negative,
            _ => Self::Neutral,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Negative => write!(f, "negative"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

/// Competitor performance widget: a multi-series price index.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompetitorTrend {
    #[serde(default)]
    pub timeseries: TrendSeriesSet,
}

/// Sector performance widget.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketTrend {
    #[serde(default)]
    pub sector_performance: TrendSeriesSet,
}

/// Event-driven price-spike widget.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EventSpikes {
    #[serde(default)]
    pub events_detected: Vec<MarketEvent>,
}

/// A labelled set of aligned series over a shared x axis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrendSeriesSet {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub x: Vec<String>,
    #[serde(default)]
    pub series: Vec<TrendSeries>,
}

impl TrendSeriesSet {
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.series.iter().all(|series| series.data.is_empty())
    }
}

/// One line of a trend chart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrendSeries {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub data: Vec<f64>,
}

/// One row of the market-events table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketEvent {
    #[serde(default)]
    pub date: String,
    #[serde(default, rename = "type")]
    pub event_type: Option<String>,
    #[serde(default)]
    pub entity_or_topic: String,
    /// "+" or "-".
    #[serde(default)]
    pub direction: String,
    #[serde(default)]
    pub price_move_1d_pct: f64,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub blurb: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_trip_carries_mode_tag() {
        let payload = ResultPayload::Rag(RagResult {
            summary: "From your documents: revenue grew 12%.".to_string(),
        });
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["mode"], "rag");
        let back: ResultPayload = serde_json::from_value(value).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn test_tagged_standard_parses() {
        let value = json!({
            "mode": "standard",
            "summary": "S",
            "market_insights": "M",
        });
        let payload: ResultPayload = serde_json::from_value(value).unwrap();
        assert_eq!(payload.mode(), QueryMode::Standard);
        assert_eq!(payload.summary(), "S");
    }

    #[test]
    fn test_legacy_untagged_standard_inferred() {
        // What the analysis endpoint returns, persisted by an older client
        // without the mode tag.
        let value = json!({
            "summary": "S",
            "market_insights": "M",
            "social_trends": [],
            "competitor_trend": {"timeseries": {"x": [], "series": []}},
            "market_trend": {"sector_performance": {"x": [], "series": []}},
            "event_spikes": {"events_detected": []},
        });
        let payload: ResultPayload = serde_json::from_value(value).unwrap();
        assert_eq!(payload.mode(), QueryMode::Standard);
    }

    #[test]
    fn test_legacy_untagged_rag_inferred() {
        let value = json!({"summary": "Only a narrative."});
        let payload: ResultPayload = serde_json::from_value(value).unwrap();
        assert_eq!(payload.mode(), QueryMode::Rag);
        assert_eq!(payload.summary(), "Only a narrative.");
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let value = json!({"mode": "hybrid", "summary": "?"});
        assert!(serde_json::from_value::<ResultPayload>(value).is_err());
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(serde_json::from_value::<ResultPayload>(json!("just a string")).is_err());
    }

    #[test]
    fn test_lenient_widget_shapes() {
        let value = json!({
            "mode": "standard",
            "summary": "S",
            "social_trends": [{"trend": "AI PCs", "sentiment": "mixed"}],
            "event_spikes": {"events_detected": [{
                "date": "2025-03-04",
                "type": "earnings",
                "entity_or_topic": "PANW",
                "direction": "+",
                "price_move_1d_pct": 6.1,
                "magnitude": "high",
                "headline": "Beat on billings",
            }]},
        });
        let ResultPayload::Standard(result) = serde_json::from_value(value).unwrap() else {
            panic!("expected standard payload");
        };
        // Unknown sentiment collapses to neutral, extra analytic fields are
        // tolerated, absent widgets default.
        assert_eq!(result.social_trends[0].sentiment, Sentiment::Neutral);
        assert_eq!(result.event_spikes.events_detected[0].direction, "+");
        assert!(result.competitor_trend.timeseries.is_empty());
    }
}
