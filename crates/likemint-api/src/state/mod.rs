//! Application state
//!
//! Holds the shared state for the Axum application: the service context
//! built once at startup.

use std::sync::Arc;

use likemint_common::{AppError, JwtService};
use likemint_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
}

impl AppState {
    pub fn new(service_context: ServiceContext) -> Self {
        Self {
            service_context: Arc::new(service_context),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the JWT service from the service context
    pub fn jwt_service(&self) -> Result<&JwtService, AppError> {
        self.service_context.jwt_service().map_err(AppError::from)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .finish()
    }
}
