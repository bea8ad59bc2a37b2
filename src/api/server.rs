//! HTTP server implementation for the Tuiter API

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use super::{controllers, handlers};
use crate::core::app_state::AppState;
use crate::core::error::Result;

/// Creates the main application router with all routes and middleware
pub fn create_app(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_origin(Any);

    let mut router = Router::new()
        // System routes
        .route("/", get(handlers::root_handler))
        .route("/health", get(handlers::health_check))
        .route("/info", get(handlers::system_info))
        // Resource routes
        .merge(controllers::routes());

    if state.config.metrics.enable_prometheus {
        router = router.route("/metrics", get(handlers::metrics_handler));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Start the HTTP server and run until `shutdown` resolves
pub async fn start_server<F>(addr: SocketAddr, state: Arc<AppState>, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    info!("Starting Tuiter API server on {}", addr);

    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Health check available at http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{send, test_app};
    use crate::core::config::Config;
    use crate::core::factory::create_app_state;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_system_routes() {
        let (app, _) = test_app().await;

        let (status, banner) = send(&app, Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(banner.as_str().unwrap().contains("/api/follows"));

        let (status, health) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(health["status"], "healthy");
        assert_eq!(health["storage"], "memory");
        assert_eq!(health["version"], crate::VERSION);

        let (_, info) = send(&app, Method::GET, "/info", None).await;
        assert_eq!(info["name"], crate::NAME);
        assert_eq!(info["resources"].as_array().unwrap().len(), 8);

        send(
            &app,
            Method::POST,
            "/api/users",
            Some(serde_json::json!({"username": "metered"})),
        )
        .await;
        let (status, metrics) = send(&app, Method::GET, "/metrics", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(metrics
            .as_str()
            .unwrap()
            .contains("tuiter_documents_created_total"));
    }

    #[tokio::test]
    async fn test_metrics_route_can_be_disabled() {
        let mut config = Config::default();
        config.metrics.enable_prometheus = false;
        let app = create_app(create_app_state(config).await.unwrap());

        let (status, _) = send(&app, Method::GET, "/metrics", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (app, _) = test_app().await;
        let (status, _) = send(&app, Method::GET, "/api/nothing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
