//! Signer error responses
//!
//! Bodies use the same `{ "error", "code" }` envelope as the API server so
//! the caller can surface the reason as a signer rejection.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use likemint_common::{AppError, ErrorResponse};
use likemint_service::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum SignerError {
    #[error("Missing or invalid bearer token")]
    Unauthorized,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("{0}")]
    App(#[from] AppError),
}

impl SignerError {
    pub fn status_code(&self) -> StatusCode {
        let code = match self {
            Self::Unauthorized => 401,
            Self::InvalidBody(_) => 400,
            Self::Service(e) => e.status_code(),
            Self::App(e) => e.status_code(),
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn error_code(&self) -> &str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::Service(e) => e.error_code(),
            Self::App(e) => e.error_code(),
        }
    }
}

impl IntoResponse for SignerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = ?self, "Signer error");
            "Internal server error".to_string()
        } else {
            warn!(error = %self, "Attestation refused");
            self.to_string()
        };

        let body = ErrorResponse {
            error: message,
            code: self.error_code().to_string(),
            details: None,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use likemint_core::DomainError;

    #[test]
    fn test_status_mapping() {
        assert_eq!(SignerError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        let err = SignerError::from(ServiceError::from(DomainError::NothingToMint));
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error_code(), "NOTHING_TO_MINT");
    }
}
