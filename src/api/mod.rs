//! # API Module
//!
//! HTTP interface for the Tuiter backend.
//!
//! ## Endpoints Overview
//!
//! ### Users and tuits
//! - `POST|GET /api/users`, `GET|PUT|DELETE /api/users/{uid}`
//! - `POST|GET /api/users/{uid}/tuits`, `GET /api/tuits`
//! - `GET|PUT|DELETE /api/tuits/{tid}`
//!
//! ### Relationships
//! - `POST|DELETE /api/users/{uid}/follows/{fid}`
//! - `GET /api/users/{uid}/follows`, `GET /api/users/{uid}/followers`
//! - `POST|DELETE /api/users/{uid}/bookmarks/{tid}`, `GET /api/users/{uid}/bookmarks`
//! - `POST|DELETE|GET /api/users/{uid}/likes/{tid}`, `GET /api/users/{uid}/likes`
//! - `GET /api/tuits/{tid}/likes`, `GET /api/tuits/{tid}/likes/count`
//! - the same five routes for `dislikes` and `unlikes`
//!
//! ### Messages
//! - `POST /api/users/{sid}/messages/{rid}`, `DELETE /api/messages/{mid}`
//! - `GET /api/users/{uid}/messagessent`, `GET /api/users/{uid}/messagesreceived`
//!
//! ### System Essentials
//! - `GET /` - Banner
//! - `GET /health` - Health check
//! - `GET /info` - Service info
//! - `GET /metrics` - Prometheus metrics, when enabled

pub mod controllers;
pub mod handlers;
pub mod server;

// Re-export commonly used items
pub use server::{create_app, start_server};

#[cfg(test)]
pub(crate) mod testing {
    //! In-process request helpers for route tests
    use axum::{
        body::{to_bytes, Body},
        http::{header::CONTENT_TYPE, Method, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    use super::create_app;
    use crate::core::app_state::AppState;
    use crate::core::config::Config;
    use crate::core::factory::create_app_state;

    /// Router over a fresh in-memory store
    pub async fn test_app() -> (Router, Arc<AppState>) {
        let state = create_app_state(Config::default()).await.unwrap();
        (create_app(state.clone()), state)
    }

    /// Send one request. Non-JSON bodies come back as a JSON string.
    pub async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, value)
    }

    /// Create a user and return its id
    pub async fn create_user(app: &Router, username: &str) -> String {
        let (_, user) = send(
            app,
            Method::POST,
            "/api/users",
            Some(json!({ "username": username })),
        )
        .await;
        user["_id"].as_str().unwrap().to_string()
    }

    /// Post a tuit as `uid` and return its id
    pub async fn create_tuit(app: &Router, uid: &str, text: &str) -> String {
        let (_, tuit) = send(
            app,
            Method::POST,
            &format!("/api/users/{}/tuits", uid),
            Some(json!({ "tuit": text })),
        )
        .await;
        tuit["_id"].as_str().unwrap().to_string()
    }
}
