//! Application configuration structs
//!
//! Loads configuration for the API server and the signer service from
//! environment variables (a `.env` file is honoured when present).

use likemint_core::Address;
use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub upstream: UpstreamConfig,
    pub chain: ChainConfig,
    pub scan: ScanConfig,
    pub signers: Vec<SignerEndpoint>,
}

/// Signer service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SignerConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub chain: ChainConfig,
    pub scan: ScanConfig,
    /// Hex-encoded secp256k1 private key
    pub private_key: String,
    /// Bearer token the API server must present
    pub bearer_token: String,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn from_env_value(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Listen address
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration (event mirror store)
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Session token and sign-in challenge configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: i64,
    /// Domain named in sign-in messages
    #[serde(default = "default_sign_in_domain")]
    pub sign_in_domain: String,
    #[serde(default = "default_challenge_ttl")]
    pub challenge_ttl_secs: i64,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Identity resolver and reaction feed endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    pub identity_url: String,
    pub feed_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_ready_timeout")]
    pub ready_timeout_secs: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl UpstreamConfig {
    /// Bounded wait for a dependency to report ready
    #[must_use]
    pub fn ready_timeout(&self) -> Duration {
        Duration::from_secs(self.ready_timeout_secs)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Chain RPC and mirror job settings
#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
    pub rpc_url: String,
    pub contract: Address,
    #[serde(default = "default_mirror_interval")]
    pub mirror_interval_secs: u64,
    #[serde(default = "default_mirror_block_span")]
    pub mirror_max_block_span: u64,
    #[serde(default)]
    pub mirror_start_block: u64,
}

impl ChainConfig {
    #[must_use]
    pub fn mirror_interval(&self) -> Duration {
        Duration::from_secs(self.mirror_interval_secs)
    }
}

/// Reaction scan limits
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ScanConfig {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_depth_limit")]
    pub depth_limit: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            depth_limit: default_depth_limit(),
            page_size: default_page_size(),
        }
    }
}

/// One signer service the API fans out to
#[derive(Clone, Deserialize)]
pub struct SignerEndpoint {
    pub url: String,
    pub token: String,
}

impl std::fmt::Debug for SignerEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignerEndpoint")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

// Default value functions
fn default_app_name() -> String {
    "likemint".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_access_token_expiry() -> i64 {
    86400 // 1 day
}

fn default_sign_in_domain() -> String {
    "likemint".to_string()
}

fn default_challenge_ttl() -> i64 {
    300
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_ready_timeout() -> u64 {
    5
}

fn default_request_timeout() -> u64 {
    15
}

fn default_mirror_interval() -> u64 {
    30
}

fn default_mirror_block_span() -> u64 {
    2000
}

fn default_max_results() -> usize {
    150
}

fn default_depth_limit() -> u32 {
    4
}

fn default_page_size() -> u32 {
    100
}

/// Parse an optional variable, falling back to `default` when unset or malformed
fn var_or<T: FromStr>(key: &str, default: impl FnOnce() -> T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(default)
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingVar(key))
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

impl AppSettings {
    fn from_env() -> Self {
        Self {
            name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
            env: env::var("APP_ENV")
                .ok()
                .and_then(|s| Environment::from_env_value(&s))
                .unwrap_or_default(),
        }
    }
}

impl UpstreamConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            identity_url: required("IDENTITY_API_URL")?,
            feed_url: required("FEED_API_URL")?,
            api_key: env::var("UPSTREAM_API_KEY").ok().filter(|s| !s.is_empty()),
            ready_timeout_secs: var_or("READY_TIMEOUT_SECS", default_ready_timeout),
            request_timeout_secs: var_or("REQUEST_TIMEOUT_SECS", default_request_timeout),
        })
    }
}

impl ChainConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let contract = required("CONTRACT_ADDRESS")?;
        Ok(Self {
            rpc_url: required("CHAIN_RPC_URL")?,
            contract: contract
                .parse()
                .map_err(|e| ConfigError::InvalidValue("CONTRACT_ADDRESS", format!("{e}")))?,
            mirror_interval_secs: var_or("MIRROR_INTERVAL_SECS", default_mirror_interval),
            mirror_max_block_span: var_or("MIRROR_MAX_BLOCK_SPAN", default_mirror_block_span),
            mirror_start_block: var_or("MIRROR_START_BLOCK", || 0),
        })
    }
}

impl ScanConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            max_results: var_or("SCAN_MAX_RESULTS", default_max_results),
            depth_limit: var_or("SCAN_DEPTH_LIMIT", default_depth_limit),
            page_size: var_or("SCAN_PAGE_SIZE", default_page_size),
        };
        if config.max_results == 0 {
            return Err(ConfigError::InvalidValue("SCAN_MAX_RESULTS", "must be positive".into()));
        }
        if config.depth_limit == 0 {
            return Err(ConfigError::InvalidValue("SCAN_DEPTH_LIMIT", "must be positive".into()));
        }
        Ok(config)
    }
}

impl SignerEndpoint {
    /// Pair comma-separated URLs with comma-separated bearer tokens
    fn parse_list(urls: &str, tokens: &str) -> Result<Vec<Self>, ConfigError> {
        let urls = split_list(urls);
        let tokens = split_list(tokens);

        if urls.is_empty() {
            return Err(ConfigError::MissingVar("SIGNER_URLS"));
        }
        if urls.len() != tokens.len() {
            return Err(ConfigError::InvalidValue(
                "SIGNER_TOKENS",
                format!("expected {} tokens, got {}", urls.len(), tokens.len()),
            ));
        }

        Ok(urls
            .into_iter()
            .zip(tokens)
            .map(|(url, token)| Self { url, token })
            .collect())
    }
}

impl AppConfig {
    /// Load API server configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings::from_env(),
            api: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| default_host()),
                port: env::var("API_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .ok_or(ConfigError::MissingVar("API_PORT"))?,
            },
            database: DatabaseConfig {
                url: required("DATABASE_URL")?,
                max_connections: var_or("DATABASE_MAX_CONNECTIONS", default_max_connections),
                min_connections: var_or("DATABASE_MIN_CONNECTIONS", default_min_connections),
            },
            jwt: JwtConfig {
                secret: required("JWT_SECRET")?,
                access_token_expiry: var_or("JWT_ACCESS_TOKEN_EXPIRY", default_access_token_expiry),
                sign_in_domain: env::var("SESSION_DOMAIN")
                    .unwrap_or_else(|_| default_sign_in_domain()),
                challenge_ttl_secs: var_or("SESSION_CHALLENGE_TTL_SECS", default_challenge_ttl),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: var_or(
                    "RATE_LIMIT_REQUESTS_PER_SECOND",
                    default_requests_per_second,
                ),
                burst: var_or("RATE_LIMIT_BURST", default_burst),
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|s| split_list(&s))
                    .unwrap_or_default(),
            },
            upstream: UpstreamConfig::from_env()?,
            chain: ChainConfig::from_env()?,
            scan: ScanConfig::from_env()?,
            signers: SignerEndpoint::parse_list(
                &env::var("SIGNER_URLS").unwrap_or_default(),
                &env::var("SIGNER_TOKENS").unwrap_or_default(),
            )?,
        })
    }
}

impl SignerConfig {
    /// Load signer service configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings::from_env(),
            server: ServerConfig {
                host: env::var("SIGNER_HOST").unwrap_or_else(|_| default_host()),
                port: env::var("SIGNER_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .ok_or(ConfigError::MissingVar("SIGNER_PORT"))?,
            },
            upstream: UpstreamConfig::from_env()?,
            chain: ChainConfig::from_env()?,
            scan: ScanConfig::from_env()?,
            private_key: required("SIGNER_PRIVATE_KEY")?,
            bearer_token: required("SIGNER_BEARER_TOKEN")?,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
