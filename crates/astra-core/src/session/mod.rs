//! Session domain: the persisted credential and the identity derived from it.

pub mod backend;
pub mod claims;
pub mod model;
pub mod repository;

pub use backend::{AuthBackend, LoginOutcome};
pub use claims::{TokenClaims, decode_claims};
pub use model::AuthSession;
pub use repository::SessionRepository;
