//! Identity hub client: wallet address -> social account

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::instrument;

use likemint_core::traits::{IdentityResolver, RepoResult};
use likemint_core::{AccountId, Address, DomainError, Identity};

use crate::http::{error_message, join};

/// `GET {base}/v1/accounts/by-address/{address}`
#[derive(Clone)]
pub struct HubIdentityClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountBody {
    id: AccountId,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    verified_addresses: Vec<Address>,
}

impl From<AccountBody> for Identity {
    fn from(body: AccountBody) -> Self {
        Self {
            id: body.id,
            display_name: body.display_name,
            verified_addresses: body.verified_addresses,
        }
    }
}

impl HubIdentityClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key,
        }
    }
}

#[async_trait]
impl IdentityResolver for HubIdentityClient {
    #[instrument(skip(self), fields(address = %address))]
    async fn resolve_by_address(&self, address: &Address) -> RepoResult<Identity> {
        let url = join(&self.base_url, &format!("v1/accounts/by-address/{address}"));
        let mut request = self.http.get(url);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::fetch(format!("identity hub: {e}")))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(DomainError::AccountNotFound(*address)),
            status if status.is_success() => {
                let body: AccountBody = response
                    .json()
                    .await
                    .map_err(|e| DomainError::fetch(format!("identity hub body: {e}")))?;
                Ok(body.into())
            }
            _ => Err(DomainError::fetch(format!(
                "identity hub: {}",
                error_message(response).await
            ))),
        }
    }
}
