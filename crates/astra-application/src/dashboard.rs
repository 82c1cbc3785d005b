//! Shared dashboard display state.
//!
//! Live submissions and history selection both write to one display slot.
//! Submissions carry a monotonically increasing sequence number; a response
//! whose sequence is no longer the latest issued is discarded instead of
//! overwriting newer state. History selection wins immediately and
//! invalidates anything still in flight.

use astra_core::exchange::{QueryMode, ResultPayload};
use tokio::sync::Mutex;

/// What the dashboard currently shows.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayedResult {
    /// Drives which widget set renders.
    pub mode: QueryMode,
    pub payload: ResultPayload,
}

#[derive(Debug, Default)]
struct Inner {
    /// Sequence of the most recently issued submission.
    latest_seq: u64,
    /// Whether a submission is outstanding; the UI disables resubmission
    /// while set.
    in_flight: bool,
    slot: Option<DisplayedResult>,
}

/// The single display slot shared by the query orchestrator and history
/// selection.
#[derive(Debug, Default)]
pub struct DashboardState {
    inner: Mutex<Inner>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new submission and returns its sequence number.
    pub async fn begin_submission(&self) -> u64 {
        let mut inner = self.inner.lock().await;
        inner.latest_seq += 1;
        inner.in_flight = true;
        inner.latest_seq
    }

    /// Installs a submission's result.
    ///
    /// Returns `false` (and leaves the slot untouched) when `seq` is not
    /// the latest issued submission — the response raced a newer one and
    /// lost.
    pub async fn present(&self, seq: u64, payload: ResultPayload) -> bool {
        let mut inner = self.inner.lock().await;
        if seq != inner.latest_seq {
            tracing::debug!("discarding stale result for submission #{seq}");
            return false;
        }
        inner.in_flight = false;
        inner.slot = Some(DisplayedResult {
            mode: payload.mode(),
            payload,
        });
        true
    }

    /// Marks a failed submission as settled. The previously displayed
    /// result, if any, is left unchanged.
    pub async fn settle_failure(&self, seq: u64) {
        let mut inner = self.inner.lock().await;
        if seq == inner.latest_seq {
            inner.in_flight = false;
        }
    }

    /// Routes a stored exchange's payload into the display slot.
    ///
    /// Always wins: bumps the sequence so any still-outstanding submission
    /// resolves as stale.
    pub async fn show_stored(&self, payload: ResultPayload) {
        let mut inner = self.inner.lock().await;
        inner.latest_seq += 1;
        inner.in_flight = false;
        inner.slot = Some(DisplayedResult {
            mode: payload.mode(),
            payload,
        });
    }

    /// The currently displayed result.
    pub async fn current(&self) -> Option<DisplayedResult> {
        self.inner.lock().await.slot.clone()
    }

    /// The mode indicator for the current display, if anything is shown.
    pub async fn mode_indicator(&self) -> Option<QueryMode> {
        self.inner.lock().await.slot.as_ref().map(|shown| shown.mode)
    }

    /// Whether a submission is outstanding.
    pub async fn is_query_in_flight(&self) -> bool {
        self.inner.lock().await.in_flight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astra_core::exchange::{RagResult, StandardResult};

    fn standard(summary: &str) -> ResultPayload {
        ResultPayload::Standard(StandardResult {
            summary: summary.to_string(),
            ..Default::default()
        })
    }

    fn rag(summary: &str) -> ResultPayload {
        ResultPayload::Rag(RagResult {
            summary: summary.to_string(),
        })
    }

    #[tokio::test]
    async fn test_present_installs_latest() {
        let state = DashboardState::new();
        let seq = state.begin_submission().await;
        assert!(state.is_query_in_flight().await);

        assert!(state.present(seq, standard("S")).await);
        assert!(!state.is_query_in_flight().await);

        let shown = state.current().await.unwrap();
        assert_eq!(shown.mode, QueryMode::Standard);
        assert_eq!(shown.payload.summary(), "S");
    }

    #[tokio::test]
    async fn test_stale_response_discarded() {
        let state = DashboardState::new();
        let first = state.begin_submission().await;
        let second = state.begin_submission().await;

        // The newer submission resolves first.
        assert!(state.present(second, standard("new")).await);
        // The older one lands late and must not overwrite.
        assert!(!state.present(first, standard("old")).await);

        assert_eq!(state.current().await.unwrap().payload.summary(), "new");
    }

    #[tokio::test]
    async fn test_history_selection_wins_over_in_flight() {
        let state = DashboardState::new();
        let seq = state.begin_submission().await;

        state.show_stored(rag("stored answer")).await;
        assert_eq!(state.mode_indicator().await, Some(QueryMode::Rag));
        assert!(!state.is_query_in_flight().await);

        // The live response arrives after the user picked a history entry.
        assert!(!state.present(seq, standard("late")).await);
        assert_eq!(
            state.current().await.unwrap().payload.summary(),
            "stored answer"
        );
    }

    #[tokio::test]
    async fn test_failure_leaves_previous_display() {
        let state = DashboardState::new();
        let seq = state.begin_submission().await;
        state.present(seq, standard("kept")).await;

        let failed = state.begin_submission().await;
        state.settle_failure(failed).await;

        assert!(!state.is_query_in_flight().await);
        assert_eq!(state.current().await.unwrap().payload.summary(), "kept");
    }
}
