//! System handlers: banner, health, info and metrics

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Json},
};
use serde::Serialize;
use std::sync::Arc;

use crate::core::app_state::AppState;
use crate::system::health::{check_health, HealthStatus};
use crate::system::metrics::collect_metrics;

/// Resources served under `/api`
pub const RESOURCES: [&str; 8] = [
    "users", "tuits", "likes", "dislikes", "unlikes", "follows", "bookmarks", "messages",
];

#[derive(Serialize)]
pub struct InfoResponse {
    pub name: String,
    pub version: String,
    pub storage: String,
    pub resources: Vec<String>,
}

/// Plain-text banner listing the resources
pub async fn root_handler() -> String {
    let mut banner = format!(
        "{} v{}\nRESTful web services for:\n",
        crate::NAME,
        crate::VERSION
    );
    for resource in RESOURCES {
        banner.push_str(&format!("  /api/{}\n", resource));
    }
    banner
}

/// Store health; 503 when the store does not answer
pub async fn health_check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthStatus>) {
    let health = check_health(state.store.as_ref()).await;
    let status = if health.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(health))
}

pub async fn system_info(State(state): State<Arc<AppState>>) -> Json<InfoResponse> {
    Json(InfoResponse {
        name: crate::NAME.to_string(),
        version: crate::VERSION.to_string(),
        storage: state.store.storage_type().to_string(),
        resources: RESOURCES.iter().map(|r| r.to_string()).collect(),
    })
}

/// Prometheus exposition text
pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(CONTENT_TYPE, "text/plain; version=0.0.4")],
        collect_metrics(),
    )
}
