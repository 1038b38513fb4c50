//! # likemint-common
//!
//! Shared utilities including configuration, error handling, session tokens,
//! Ethereum signing keys, and telemetry.

pub mod auth;
pub mod config;
pub mod crypto;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{Claims, JwtService, SessionToken};
pub use config::{
    AppConfig, AppSettings, ChainConfig, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, RateLimitConfig, ScanConfig, ServerConfig, SignerConfig, SignerEndpoint,
    UpstreamConfig,
};
pub use crypto::{recover_address, EthereumKey};
pub use error::{AppError, AppResult, ErrorResponse};
pub use telemetry::{
    try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
