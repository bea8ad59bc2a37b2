//! Tuiter API Server
//!
//! Serves the Tuiter REST API over HTTP on top of an in-memory or MongoDB
//! document store.

use clap::{Arg, ArgMatches, Command};
use tokio::signal;
use tracing::{info, warn};
use tuiter::api::start_server;
use tuiter::core::config::{Config, StorageType};
use tuiter::core::factory::create_app_state;
use tuiter::{Error, Result};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let matches = Command::new("tuiter")
        .version(tuiter::VERSION)
        .about("Tuiter social-networking backend.")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path"),
        )
        .arg(
            Arg::new("http-addr")
                .long("http-addr")
                .value_name("ADDR")
                .help("HTTP server bind address"),
        )
        .arg(
            Arg::new("storage-type")
                .long("storage-type")
                .value_name("TYPE")
                .help("Storage backend type (memory, mongo)"),
        )
        .arg(
            Arg::new("mongo-uri")
                .long("mongo-uri")
                .value_name("URI")
                .help("MongoDB connection string"),
        )
        .arg(
            Arg::new("database")
                .long("database")
                .value_name("NAME")
                .help("MongoDB database name"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level (trace, debug, info, warn, error)"),
        )
        .get_matches();

    // Load configuration
    let mut config = Config::load(matches.get_one::<String>("config").map(String::as_str))?;

    // Apply CLI overrides
    apply_cli_overrides(&mut config, &matches)?;
    config.validate()?;

    // Initialize logging
    tuiter::init_logging(&config.logging)?;
    info!(
        "Starting Tuiter v{} ({} storage)",
        tuiter::VERSION,
        config.storage.storage_type
    );

    let addr = config.server.http_addr;
    let state = create_app_state(config).await?;

    start_server(addr, state, shutdown_signal()).await?;

    info!("Shutdown complete");
    Ok(())
}

/// Apply command line argument overrides to configuration
fn apply_cli_overrides(config: &mut Config, matches: &ArgMatches) -> Result<()> {
    if let Some(addr) = matches.get_one::<String>("http-addr") {
        config.server.http_addr = addr
            .parse()
            .map_err(|e| Error::config(format!("Invalid HTTP address: {}", e)))?;
    }

    if let Some(storage_type) = matches.get_one::<String>("storage-type") {
        config.storage.storage_type = storage_type.parse::<StorageType>()?;
    }

    if let Some(uri) = matches.get_one::<String>("mongo-uri") {
        config.storage.mongo_uri = uri.clone();
    }

    if let Some(database) = matches.get_one::<String>("database") {
        config.storage.database = database.clone();
    }

    if let Some(level) = matches.get_one::<String>("log-level") {
        config.logging.level = level.clone();
    }

    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }
    warn!("Received shutdown signal, initiating graceful shutdown...");
}
