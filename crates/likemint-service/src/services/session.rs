//! Session service - wallet sign-in
//!
//! The caller first asks for a challenge, then proves control of the wallet
//! by signing it with the EIP-191 personal-message prefix. A challenge is
//! good for one session. Both steps require an address that is linked and
//! verified for its social account.

use chrono::Utc;
use tracing::{info, instrument, warn};

use likemint_common::{recover_address, AppError};
use likemint_core::encoding::personal_message_hash;
use likemint_core::AttestationSignature;

use crate::dto::{ChallengeRequest, ChallengeResponse, SessionRequest, SessionResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::scan::resolve_verified;

/// Session service
pub struct SessionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SessionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Issue a fresh sign-in message for a verified wallet
    #[instrument(skip(self, request), fields(address = %request.address))]
    pub async fn challenge(&self, request: ChallengeRequest) -> ServiceResult<ChallengeResponse> {
        resolve_verified(self.ctx, &request.address).await?;

        let challenges = self.ctx.challenges();
        let challenge = challenges.issue(request.address, Utc::now());

        Ok(ChallengeResponse {
            message: challenge.message,
            nonce: challenge.nonce,
            expires_in: challenges.ttl().num_seconds(),
        })
    }

    /// Verify the signed challenge and issue a session token
    #[instrument(skip(self, request), fields(address = %request.address))]
    pub async fn create_session(&self, request: SessionRequest) -> ServiceResult<SessionResponse> {
        let bytes = hex::decode(request.signature.trim_start_matches("0x"))
            .map_err(|_| ServiceError::validation("signature is not valid hex"))?;
        let signature = AttestationSignature::from_slice(&bytes)?;

        let signer = recover_address(&personal_message_hash(request.message.as_bytes()), &signature)?;
        if signer != request.address {
            warn!(recovered = %signer, "sign-in signature does not match address");
            return Err(AppError::InvalidSignature(
                "signature was not produced by the given address".to_string(),
            )
            .into());
        }

        if !self
            .ctx
            .challenges()
            .redeem(&request.address, &request.message, Utc::now())
        {
            warn!("sign-in message is not an outstanding challenge");
            return Err(AppError::InvalidSignature(
                "sign-in challenge is missing, stale or already used".to_string(),
            )
            .into());
        }

        let identity = resolve_verified(self.ctx, &request.address).await?;

        let token = self.ctx.jwt_service()?.issue(identity.id, request.address)?;

        info!(account = %identity.id, "session issued");

        Ok(SessionResponse {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
            account_id: identity.id,
        })
    }
}
