//! # likemint-db
//!
//! PostgreSQL store for the event mirror.
//!
//! ## Overview
//!
//! The mirror job copies `Mint` and `Claim` logs from the contract into
//! `chain_events` so the API can answer "what has this address received"
//! without scanning the chain. This crate handles:
//!
//! - Connection pool management and schema bootstrap
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - The `ChainEventRepository` implementation
//!
//! ## Usage
//!
//! ```rust,ignore
//! use likemint_db::{create_pool, run_migrations, DatabaseConfig, PgChainEventRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::from_env()).await?;
//!     run_migrations(&pool).await?;
//!     let events = PgChainEventRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool};
pub use repositories::PgChainEventRepository;
