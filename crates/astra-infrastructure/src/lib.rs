//! Astra infrastructure: client-local persistence.
//!
//! File-backed implementations of the core storage traits plus platform
//! path resolution. Nothing here talks to the network.

pub mod config_storage;
pub mod paths;
pub mod session_storage;

pub use crate::config_storage::ConfigStorage;
pub use crate::paths::AstraPaths;
pub use crate::session_storage::FileSessionStorage;
