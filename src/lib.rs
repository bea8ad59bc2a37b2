//! Tuiter - a social-networking backend
//!
//! REST services for users, tuits, likes, dislikes, unlikes, follows,
//! bookmarks and direct messages, stored in a document database. Every
//! relationship lives in its own join collection and is resolved on demand.

// Configure global allocator
#[global_allocator]
static GLOBAL: jemallocator::Jemalloc = jemallocator::Jemalloc;

// Core foundational modules
pub mod core;

// Main functional modules
pub mod api;
pub mod daos;
pub mod models;
pub mod storage;
pub mod system;

// Re-export commonly used items for convenience
pub use crate::core::{Config, Error, Id, Reference, Result};

use crate::core::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when it is set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let installed = match config.format.as_str() {
        "json" => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init(),
        _ => tracing_subscriber::fmt().with_env_filter(filter).try_init(),
    };
    installed.map_err(|e| Error::internal(format!("Failed to initialize logging: {}", e)))?;

    tracing::info!("Initializing {} v{}", NAME, VERSION);
    Ok(())
}
