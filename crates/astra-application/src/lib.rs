//! Astra application: the use-case services behind the client surface.
//!
//! Each service owns one concern from the dashboard: session lifecycle,
//! query orchestration, history replay, document management, and the
//! shared display slot. Services receive their collaborators by `Arc`, so
//! the CLI wires them once at startup and tests wire them against mocks.

pub mod dashboard;
pub mod document_service;
pub mod history_service;
pub mod query_service;
pub mod session_service;

pub use crate::dashboard::{DashboardState, DisplayedResult};
pub use crate::document_service::DocumentService;
pub use crate::history_service::{DeleteOutcome, HistoryService};
pub use crate::query_service::QueryService;
pub use crate::session_service::SessionService;
