//! Signer application state

use std::sync::Arc;

use subtle::ConstantTimeEq;

use likemint_common::EthereumKey;
use likemint_service::ServiceContext;

/// Shared secret the API server presents on every request
#[derive(Clone)]
pub struct BearerToken(Arc<str>);

impl BearerToken {
    pub fn new(token: &str) -> Self {
        Self(Arc::from(token))
    }

    pub fn accepts(&self, token: &str) -> bool {
        bool::from(self.0.as_bytes().ct_eq(token.as_bytes()))
    }
}

#[derive(Clone)]
pub struct SignerState {
    service_context: Arc<ServiceContext>,
    key: Arc<EthereumKey>,
    bearer_token: BearerToken,
}

impl SignerState {
    pub fn new(service_context: ServiceContext, key: EthereumKey, bearer_token: &str) -> Self {
        Self {
            service_context: Arc::new(service_context),
            key: Arc::new(key),
            bearer_token: BearerToken::new(bearer_token),
        }
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    pub fn key(&self) -> &EthereumKey {
        &self.key
    }

    /// Whether `token` is the token the API server was given
    pub fn accepts(&self, token: &str) -> bool {
        self.bearer_token.accepts(token)
    }
}

impl std::fmt::Debug for SignerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignerState")
            .field("address", &self.key.address())
            .finish_non_exhaustive()
    }
}
