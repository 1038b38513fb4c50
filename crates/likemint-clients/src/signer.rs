//! HTTP client for one signer service

use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

use likemint_core::traits::{RepoResult, Signer};
use likemint_core::{
    AttestationRequest, AttestationSignature, DomainError, MintArguments, SignedAttestation,
};

use crate::http::{error_message, join};

/// `POST {url}/attest` with a bearer token
pub struct HttpSignerClient {
    index: usize,
    http: reqwest::Client,
    url: String,
    token: String,
}

#[derive(Deserialize)]
struct AttestBody {
    arguments: MintArguments,
    signature: AttestationSignature,
}

impl HttpSignerClient {
    pub fn new(
        index: usize,
        http: reqwest::Client,
        url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            index,
            http,
            url: url.into(),
            token: token.into(),
        }
    }

    fn unreachable(&self, reason: impl ToString) -> DomainError {
        DomainError::SignerUnreachable {
            signer: self.index,
            reason: reason.to_string(),
        }
    }

    fn rejected(&self, reason: impl ToString) -> DomainError {
        DomainError::SignerRejected {
            signer: self.index,
            reason: reason.to_string(),
        }
    }
}

impl std::fmt::Debug for HttpSignerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSignerClient")
            .field("index", &self.index)
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Signer for HttpSignerClient {
    fn index(&self) -> usize {
        self.index
    }

    #[instrument(skip(self), fields(signer = self.index, url = %self.url))]
    async fn attest(&self, request: &AttestationRequest) -> RepoResult<SignedAttestation> {
        let response = self
            .http
            .post(join(&self.url, "attest"))
            .bearer_auth(&self.token)
            .json(request)
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;

        if !response.status().is_success() {
            return Err(self.rejected(error_message(response).await));
        }

        let body: AttestBody = response
            .json()
            .await
            .map_err(|e| self.rejected(format!("malformed response: {e}")))?;

        Ok(SignedAttestation {
            signer: self.index,
            arguments: body.arguments,
            signature: body.signature,
        })
    }
}
