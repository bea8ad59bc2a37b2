//! System utilities and monitoring
//!
//! Metrics export and the health probe behind `/health`.

pub mod metrics;

pub mod health {
    //! Health checks against the configured document store
    use crate::core::config::StorageType;
    use crate::storage::DocumentStore;
    use serde::Serialize;
    use tracing::warn;

    /// Health report returned by `/health`
    #[derive(Debug, Clone, Serialize)]
    pub struct HealthStatus {
        /// Overall service status
        pub status: ServiceStatus,
        /// Crate version
        pub version: &'static str,
        /// Active storage backend
        pub storage: StorageType,
        /// Why the store is unhealthy, if it is
        #[serde(skip_serializing_if = "Option::is_none")]
        pub error: Option<String>,
    }

    /// Service health levels
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    #[serde(rename_all = "lowercase")]
    pub enum ServiceStatus {
        /// The store answered
        Healthy,
        /// The store did not answer
        Unhealthy,
    }

    impl HealthStatus {
        /// Whether every check passed
        pub fn is_healthy(&self) -> bool {
            self.status == ServiceStatus::Healthy
        }
    }

    /// Ping the store and report the outcome
    pub async fn check_health(store: &dyn DocumentStore) -> HealthStatus {
        let (status, error) = match store.ping().await {
            Ok(()) => (ServiceStatus::Healthy, None),
            Err(e) => {
                warn!("Health check failed: {}", e);
                (ServiceStatus::Unhealthy, Some(e.to_string()))
            }
        };

        HealthStatus {
            status,
            version: crate::VERSION,
            storage: store.storage_type(),
            error,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::storage::MemStore;

        #[tokio::test]
        async fn test_memory_store_is_healthy() {
            let store = MemStore::new();
            let health = check_health(&store).await;
            assert!(health.is_healthy());
            assert_eq!(health.storage, StorageType::Memory);
            assert_eq!(
                serde_json::to_value(&health).unwrap()["status"],
                serde_json::json!("healthy")
            );
        }
    }
}
