//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and making HTTP requests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::Router;
use likemint_api::{create_app, AppState};
use likemint_clients::HttpSignerClient;
use likemint_common::{EthereumKey, JwtService};
use likemint_core::encoding::personal_message_hash;
use likemint_core::ChainEvent;
use likemint_service::dto::{ApiResponse, ChallengeResponse, SessionResponse};
use likemint_service::ServiceContext;
use likemint_signer::SignerState;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::{
    reference_chain, reference_feed, MemoryEventStore, MemoryIdentity, SIGNER_KEYS, TARGET_ID,
    TARGET_KEY,
};

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Serve `app` on an ephemeral loopback port
    pub async fn spawn(app: Router) -> Result<Self> {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).json(body).send().await?)
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await?)
    }
}

fn signer_token(index: usize) -> String {
    format!("signer-token-{index}")
}

/// API server plus its signer services, all running the reference scenario
pub struct World {
    pub api: TestServer,
    pub signers: Vec<TestServer>,
    pub target: EthereumKey,
}

/// Knobs for the deployment under test
#[derive(Default)]
pub struct WorldBuilder {
    wrong_token_for: Option<usize>,
    dead_signer: bool,
    events: Vec<ChainEvent>,
}

impl WorldBuilder {
    /// Give the API the wrong bearer token for one signer
    pub fn wrong_token_for(mut self, index: usize) -> Self {
        self.wrong_token_for = Some(index);
        self
    }

    /// Configure an extra signer whose port has nothing listening
    pub fn dead_signer(mut self) -> Self {
        self.dead_signer = true;
        self
    }

    /// Pre-populate the event mirror store
    pub fn events(mut self, events: Vec<ChainEvent>) -> Self {
        self.events = events;
        self
    }

    pub async fn start(self) -> Result<World> {
        let target = EthereumKey::from_hex(TARGET_KEY)?;
        let identity = || MemoryIdentity::default().link(target.address(), TARGET_ID, true);

        let mut signers = Vec::new();
        for (index, key) in SIGNER_KEYS.iter().enumerate() {
            let ctx = ServiceContext::builder()
                .identity(Arc::new(identity()))
                .feed(Arc::new(reference_feed()))
                .boundaries(Arc::new(reference_chain()))
                .build()?;
            let state = SignerState::new(ctx, EthereumKey::from_hex(key)?, &signer_token(index));
            signers.push(TestServer::spawn(likemint_signer::create_app(state)).await?);
        }

        let http = Client::new();
        let mut builder = ServiceContext::builder()
            .identity(Arc::new(identity()))
            .feed(Arc::new(reference_feed()))
            .boundaries(Arc::new(reference_chain()))
            .events(Arc::new(MemoryEventStore::with_events(self.events)))
            .jwt_service(Arc::new(JwtService::new("integration-secret", 3600)));

        for (index, signer) in signers.iter().enumerate() {
            let token = if self.wrong_token_for == Some(index) {
                "not-the-token".to_string()
            } else {
                signer_token(index)
            };
            builder = builder.signer(Arc::new(HttpSignerClient::new(
                index,
                http.clone(),
                signer.base_url(),
                token,
            )));
        }
        if self.dead_signer {
            let closed = TcpListener::bind(("127.0.0.1", 0)).await?.local_addr()?;
            builder = builder.signer(Arc::new(HttpSignerClient::new(
                signers.len(),
                http.clone(),
                format!("http://{closed}"),
                "unused",
            )));
        }

        let api = TestServer::spawn(create_app(AppState::new(builder.build()?))).await?;

        Ok(World {
            api,
            signers,
            target,
        })
    }
}

impl World {
    pub fn builder() -> WorldBuilder {
        WorldBuilder::default()
    }

    /// Reference deployment with two healthy signers
    pub async fn start() -> Result<Self> {
        Self::builder().start().await
    }

    /// Ask the API for a sign-in message for the target wallet
    pub async fn challenge(&self) -> Result<String> {
        let response = self
            .api
            .post(
                "/session/challenge",
                &serde_json::json!({ "address": self.target.address() }),
            )
            .await?;
        let body: ApiResponse<ChallengeResponse> = assert_json(response, StatusCode::OK).await?;
        Ok(body.result.message)
    }

    /// `POST /session` body with `message` signed by the target wallet
    pub fn signed_session(&self, message: &str) -> Result<serde_json::Value> {
        let signature = self
            .target
            .sign_hash(&personal_message_hash(message.as_bytes()))?;
        Ok(serde_json::json!({
            "address": self.target.address(),
            "message": message,
            "signature": signature,
        }))
    }

    /// Sign in as the target wallet and return the access token
    pub async fn session(&self) -> Result<String> {
        let body = self.signed_session(&self.challenge().await?)?;
        let response = self.api.post("/session", &body).await?;
        let body: ApiResponse<SessionResponse> = assert_json(response, StatusCode::OK).await?;
        Ok(body.result.access_token)
    }
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
