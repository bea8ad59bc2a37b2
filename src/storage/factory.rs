//! Storage factory for creating storage implementations based on configuration

use std::sync::Arc;
use tracing::info;

use super::{MemStore, MongoStore, SharedStore};
use crate::core::config::{StorageConfig, StorageType};
use crate::core::error::Result;

/// Create the document store selected by the configuration
pub async fn create_store(config: &StorageConfig) -> Result<SharedStore> {
    match config.storage_type {
        StorageType::Memory => {
            info!("Using in-memory document store");
            Ok(Arc::new(MemStore::new()))
        }
        StorageType::Mongo => {
            info!("Using MongoDB document store ({})", config.database);
            let store = MongoStore::connect(&config.mongo_uri, &config.database).await?;
            Ok(Arc::new(store))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage_creation() {
        let config = StorageConfig {
            storage_type: StorageType::Memory,
            ..Default::default()
        };

        let store = create_store(&config).await.unwrap();
        assert_eq!(store.storage_type(), StorageType::Memory);
        assert!(store.ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_mongo_storage_with_bad_uri_fails() {
        let config = StorageConfig {
            storage_type: StorageType::Mongo,
            mongo_uri: "http://not-mongo".to_string(),
            ..Default::default()
        };

        assert!(create_store(&config).await.is_err());
    }
}
