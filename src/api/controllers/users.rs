//! RESTful API for the users resource
//!
//! - `POST /api/users` create a user
//! - `GET /api/users` list every user
//! - `GET /api/users/:uid` fetch one user
//! - `PUT /api/users/:uid` update some of a user's fields
//! - `DELETE /api/users/:uid` remove a user

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use crate::core::app_state::AppState;
use crate::core::error::Result;
use crate::models::{User, UserProfile};
use crate::storage::{DeleteResult, UpdateResult};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users", get(find_all_users).post(create_user))
        .route(
            "/api/users/:uid",
            get(find_user_by_id).put(update_user).delete(delete_user),
        )
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<User>> {
    Ok(Json(state.users.create_user(profile).await?))
}

async fn find_all_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>> {
    Ok(Json(state.users.find_all_users().await?))
}

async fn find_user_by_id(
    State(state): State<Arc<AppState>>,
    Path(uid): Path<String>,
) -> Result<Json<Option<User>>> {
    Ok(Json(state.users.find_user_by_id(&uid).await?))
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(uid): Path<String>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<UpdateResult>> {
    Ok(Json(state.users.update_user(&uid, profile).await?))
}

async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(uid): Path<String>,
) -> Result<Json<DeleteResult>> {
    Ok(Json(state.users.delete_user(&uid).await?))
}

#[cfg(test)]
mod tests {
    use crate::api::testing::{send, test_app};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_user_crud_over_http() {
        let (app, _) = test_app().await;

        let (status, created) = send(
            &app,
            Method::POST,
            "/api/users",
            Some(json!({"username": "alice", "email": "alice@example.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let uid = created["_id"].as_str().unwrap().to_string();
        assert_eq!(created["username"], "alice");

        let (_, updated) = send(
            &app,
            Method::PUT,
            &format!("/api/users/{}", uid),
            Some(json!({"biography": "hi there"})),
        )
        .await;
        assert_eq!(updated, json!({"acknowledged": true, "matchedCount": 1, "modifiedCount": 1}));

        let (_, user) = send(&app, Method::GET, &format!("/api/users/{}", uid), None).await;
        assert_eq!(user["biography"], "hi there");
        assert_eq!(user["email"], "alice@example.com");

        let (_, all) = send(&app, Method::GET, "/api/users", None).await;
        assert_eq!(all.as_array().unwrap().len(), 1);

        let (_, deleted) = send(&app, Method::DELETE, &format!("/api/users/{}", uid), None).await;
        assert_eq!(deleted["deletedCount"], 1);

        let (status, missing) = send(&app, Method::GET, &format!("/api/users/{}", uid), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(missing.is_null());
    }

    #[tokio::test]
    async fn test_malformed_user_id_is_a_server_error() {
        let (app, _) = test_app().await;
        let (status, body) = send(&app, Method::GET, "/api/users/u1", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.as_str().unwrap().contains("Cast to ObjectId failed"));
    }
}
