//! Factory for building the application state from configuration

use std::sync::Arc;
use tracing::info;

use crate::core::app_state::AppState;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::storage::create_store;
use crate::system::metrics;

/// Create the store selected by `config` and every DAO on top of it
pub async fn create_app_state(config: Config) -> Result<Arc<AppState>> {
    if config.metrics.enable_prometheus {
        metrics::init_registry();
    }

    let store = create_store(&config.storage).await?;
    info!(
        "Application state ready ({} storage)",
        store.storage_type()
    );

    Ok(Arc::new(AppState::new(store, config)))
}
