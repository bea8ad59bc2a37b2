//! RESTful API for the follows resource
//!
//! - `POST /api/users/:uid/follows/:fid` user `uid` follows user `fid`
//! - `DELETE /api/users/:uid/follows/:fid` user `uid` unfollows user `fid`
//! - `GET /api/users/:uid/follows` users followed by `uid`
//! - `GET /api/users/:uid/followers` users following `uid`

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use crate::core::app_state::AppState;
use crate::core::error::Result;
use crate::models::Follow;
use crate::storage::DeleteResult;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/users/:uid/follows/:fid",
            post(user_follows_user).delete(user_unfollows_user),
        )
        .route("/api/users/:uid/follows", get(find_all_users_followed_by_user))
        .route("/api/users/:uid/followers", get(find_all_users_following_user))
}

async fn user_follows_user(
    State(state): State<Arc<AppState>>,
    Path((uid, fid)): Path<(String, String)>,
) -> Result<Json<Follow>> {
    Ok(Json(state.follows.user_follows_user(&uid, &fid).await?))
}

async fn user_unfollows_user(
    State(state): State<Arc<AppState>>,
    Path((uid, fid)): Path<(String, String)>,
) -> Result<Json<DeleteResult>> {
    Ok(Json(state.follows.user_unfollows_user(&uid, &fid).await?))
}

async fn find_all_users_followed_by_user(
    State(state): State<Arc<AppState>>,
    Path(uid): Path<String>,
) -> Result<Json<Vec<Follow>>> {
    Ok(Json(state.follows.find_all_users_followed_by_user(&uid).await?))
}

async fn find_all_users_following_user(
    State(state): State<Arc<AppState>>,
    Path(uid): Path<String>,
) -> Result<Json<Vec<Follow>>> {
    Ok(Json(state.follows.find_all_users_following_user(&uid).await?))
}

#[cfg(test)]
mod tests {
    use crate::api::testing::{create_user, send, test_app};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_follow_then_list_resolves_followed_user() {
        let (app, _) = test_app().await;
        let u1 = create_user(&app, "alice").await;
        let u2 = create_user(&app, "bob").await;

        let (status, follow) = send(
            &app,
            Method::POST,
            &format!("/api/users/{}/follows/{}", u1, u2),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(follow["userFollowing"], json!(u1));
        assert_eq!(follow["userFollowed"], json!(u2));
        assert!(follow["_id"].is_string());

        let (_, follows) =
            send(&app, Method::GET, &format!("/api/users/{}/follows", u1), None).await;
        let follows = follows.as_array().unwrap().clone();
        assert_eq!(follows.len(), 1);
        assert_eq!(follows[0]["userFollowed"]["_id"], json!(u2));
        assert_eq!(follows[0]["userFollowed"]["username"], "bob");

        let (_, followers) =
            send(&app, Method::GET, &format!("/api/users/{}/followers", u2), None).await;
        assert_eq!(followers[0]["userFollowing"]["username"], "alice");
    }

    #[tokio::test]
    async fn test_unfollow_and_unfollow_again() {
        let (app, _) = test_app().await;
        let u1 = create_user(&app, "alice").await;
        let u2 = create_user(&app, "bob").await;
        let path = format!("/api/users/{}/follows/{}", u1, u2);

        send(&app, Method::POST, &path, None).await;
        let (_, first) = send(&app, Method::DELETE, &path, None).await;
        assert_eq!(first["deletedCount"], 1);

        let (status, second) = send(&app, Method::DELETE, &path, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(second["deletedCount"], 0);

        let (_, follows) =
            send(&app, Method::GET, &format!("/api/users/{}/follows", u1), None).await;
        assert!(follows.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_follow_with_malformed_ids_fails() {
        let (app, _) = test_app().await;
        let (status, _) = send(&app, Method::POST, "/api/users/u1/follows/u2", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
