//! Signer server setup

use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use likemint_clients::{build_client, ChainRpcClient, FeedClient, HttpClientConfig, HubIdentityClient};
use likemint_common::{AppError, EthereumKey, SignerConfig};
use likemint_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

use crate::handlers;
use crate::state::SignerState;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(25);

/// Build the signer router
pub fn create_app(state: SignerState) -> Router {
    Router::new()
        .route("/attest", post(handlers::attest))
        .route("/health", get(handlers::health))
        .route("/address", get(handlers::address))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT)),
        )
        .with_state(state)
}

/// Build the signer's own upstream clients and key
pub fn create_state(config: &SignerConfig) -> Result<SignerState, AppError> {
    if config.bearer_token.is_empty() {
        return Err(AppError::Config("SIGNER_BEARER_TOKEN must not be empty".to_string()));
    }
    let key = EthereumKey::from_hex(&config.private_key)?;

    let http = build_client(HttpClientConfig::from(&config.upstream))?;
    let service_context = ServiceContextBuilder::new()
        .identity(Arc::new(HubIdentityClient::new(
            http.clone(),
            config.upstream.identity_url.clone(),
            config.upstream.api_key.clone(),
        )))
        .feed(Arc::new(FeedClient::new(
            http.clone(),
            config.upstream.feed_url.clone(),
            config.upstream.api_key.clone(),
        )))
        .boundaries(Arc::new(ChainRpcClient::new(
            http,
            config.chain.rpc_url.clone(),
            config.chain.contract,
        )))
        .scan_config(config.scan)
        .ready_timeout(config.upstream.ready_timeout())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    info!(signer = %key.address(), "Signer key loaded");
    Ok(SignerState::new(service_context, key, &config.bearer_token))
}

/// Run the signer until it fails
pub async fn run(config: SignerConfig) -> Result<(), AppError> {
    let app = create_app(create_state(&config)?);
    let address = config.server.address();

    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {address}: {e}")))?;
    info!("Signer listening on http://{}", address);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))
}
