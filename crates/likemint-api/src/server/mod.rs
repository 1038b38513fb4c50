//! Server setup and initialization
//!
//! Builds every long-lived client once, wires them into the service
//! context, starts the event mirror, and serves the router.

use std::sync::Arc;

use axum::Router;
use likemint_clients::{
    build_client, ChainRpcClient, FeedClient, HttpClientConfig, HttpSignerClient,
    HubIdentityClient,
};
use likemint_common::{AppConfig, AppError, JwtService};
use likemint_db::{create_pool, run_migrations, PgChainEventRepository};
use likemint_service::{EventMirror, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the application with the base middleware stack
pub fn create_app(state: AppState) -> Router {
    let router = create_router().merge(health_routes());
    apply_middleware(router).with_state(state)
}

/// Build the application with rate limiting and configured CORS
///
/// Health routes bypass the rate limiter.
pub fn create_app_with_config(state: AppState, config: &AppConfig) -> Result<Router, AppError> {
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;
    let health = apply_middleware(health_routes());
    Ok(api.merge(health).with_state(state))
}

/// Initialize all dependencies
///
/// Returns the handler state and the (not yet started) event mirror.
pub async fn bootstrap(config: &AppConfig) -> Result<(AppState, EventMirror), AppError> {
    if config.signers.is_empty() {
        return Err(AppError::Config("SIGNER_URLS must list at least one signer".to_string()));
    }

    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&likemint_db::DatabaseConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    let http = build_client(HttpClientConfig::from(&config.upstream))?;

    let identity = Arc::new(HubIdentityClient::new(
        http.clone(),
        config.upstream.identity_url.clone(),
        config.upstream.api_key.clone(),
    ));
    let feed = Arc::new(FeedClient::new(
        http.clone(),
        config.upstream.feed_url.clone(),
        config.upstream.api_key.clone(),
    ));
    let chain = Arc::new(ChainRpcClient::new(
        http.clone(),
        config.chain.rpc_url.clone(),
        config.chain.contract,
    ));
    let events = Arc::new(PgChainEventRepository::new(pool));
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));

    let mut builder = ServiceContextBuilder::new()
        .identity(identity)
        .feed(feed)
        .boundaries(chain.clone())
        .events(events.clone())
        .jwt_service(jwt_service)
        .sign_in(config.jwt.sign_in_domain.clone(), config.jwt.challenge_ttl_secs)
        .scan_config(config.scan)
        .ready_timeout(config.upstream.ready_timeout());
    for (index, endpoint) in config.signers.iter().enumerate() {
        builder = builder.signer(Arc::new(HttpSignerClient::new(
            index,
            http.clone(),
            endpoint.url.clone(),
            endpoint.token.clone(),
        )));
    }
    let service_context = builder.build().map_err(|e| AppError::Config(e.to_string()))?;

    info!(signers = config.signers.len(), "Service context ready");

    let mirror = EventMirror::new(chain, events, &config.chain);
    Ok((AppState::new(service_context), mirror))
}

/// Run the HTTP server until it fails
pub async fn run_server(app: Router, address: &str) -> Result<(), AppError> {
    let listener = TcpListener::bind(address)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {address}: {e}")))?;

    info!("Server listening on http://{}", address);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let (state, mirror) = bootstrap(&config).await?;
    mirror.spawn();

    let app = create_app_with_config(state, &config)?;
    run_server(app, &config.api.address()).await
}
