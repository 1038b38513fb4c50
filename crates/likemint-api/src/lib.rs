//! # likemint-api
//!
//! REST API server built with Axum framework: wallet sessions, reaction
//! scans, signed mint arguments, and the mirrored chain event feed.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{bootstrap, create_app, create_app_with_config, run};
pub use state::AppState;
