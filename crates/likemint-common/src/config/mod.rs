//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ChainConfig, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, RateLimitConfig, ScanConfig, ServerConfig, SignerConfig, SignerEndpoint,
    UpstreamConfig,
};
