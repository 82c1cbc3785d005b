//! Astra interaction: the HTTP client for the intelligence backend.
//!
//! Implements the `astra-core` backend traits over the backend's REST
//! surface. Endpoint paths and payload shapes are the backend's contract;
//! nothing here decides *when* to call — that is the application layer's
//! job.

pub mod client;
pub mod dto;

pub use crate::client::HttpBackendClient;
