//! Axum extractors for request handling
//!
//! Custom extractors for session authentication and validated input.

mod auth;
mod validated;

pub use auth::AuthUser;
pub use validated::{ValidatedJson, ValidatedQuery};
