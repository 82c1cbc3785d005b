//! Astra core: domain models and traits for the market-intelligence client.
//!
//! Everything here is backend-agnostic. The concrete HTTP client lives in
//! `astra-interaction`, local persistence in `astra-infrastructure`, and
//! the use-case services that tie them together in `astra-application`.

pub mod config;
pub mod document;
pub mod error;
pub mod exchange;
pub mod router;
pub mod session;

// Re-export common error type
pub use error::{AstraError, Result};
