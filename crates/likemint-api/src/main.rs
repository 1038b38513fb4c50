//! Likemint API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p likemint-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use likemint_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load configuration before tracing so the log format follows APP_ENV
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Failed to initialize tracing: {e}");
        std::process::exit(1);
    }

    info!(
        env = ?config.app.env,
        address = %config.api.address(),
        signers = config.signers.len(),
        "Starting Likemint API Server..."
    );

    if let Err(e) = likemint_api::run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}
