//! Likemint Signer entry point
//!
//! Run with:
//! ```bash
//! cargo run -p likemint-signer
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use likemint_common::{try_init_tracing_with_config, SignerConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match SignerConfig::from_env() {
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
        address = %config.server.address(),
        "Starting Likemint Signer..."
    );

    if let Err(e) = likemint_signer::run(config).await {
        error!(error = %e, "Signer failed");
        std::process::exit(1);
    }
}
