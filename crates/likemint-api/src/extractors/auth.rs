//! Session extractor
//!
//! Extracts and validates the session JWT from the Authorization header.
//! A missing, malformed, or expired token is reported as `INVALID_SESSION`.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use likemint_core::{AccountId, Address};

use crate::response::ApiError;
use crate::state::AppState;

/// Signed-in account extracted from the session token
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub account_id: AccountId,
    /// Verified wallet the session was opened with
    pub address: Address,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::invalid_session())?;

        let app_state = AppState::from_ref(state);

        let claims = app_state
            .jwt_service()?
            .decode_token(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected session token");
                ApiError::invalid_session()
            })?;

        let malformed = |e: likemint_common::AppError| {
            tracing::warn!(error = %e, "Malformed session claims");
            ApiError::invalid_session()
        };

        Ok(AuthUser {
            account_id: claims.account_id().map_err(malformed)?,
            address: claims.address().map_err(malformed)?,
        })
    }
}
