//! Document domain: the user's RAG-indexed uploads.

pub mod backend;
pub mod model;

pub use backend::DocumentBackend;
pub use model::{Document, DocumentMetadata};
