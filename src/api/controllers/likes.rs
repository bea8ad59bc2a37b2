//! RESTful API for the likes resource
//!
//! - `POST /api/users/:uid/likes/:tid` like a tuit
//! - `DELETE /api/users/:uid/likes/:tid` remove a like
//! - `GET /api/users/:uid/likes/:tid` a user's like of a tuit, or null
//! - `GET /api/users/:uid/likes` tuits liked by a user, with authors
//! - `GET /api/tuits/:tid/likes` users that liked a tuit
//! - `GET /api/tuits/:tid/likes/count` number of likes on a tuit

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use super::Count;
use crate::core::app_state::AppState;
use crate::core::error::Result;
use crate::models::Like;
use crate::storage::DeleteResult;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/users/:uid/likes/:tid",
            get(find_user_likes_tuit)
                .post(user_likes_tuit)
                .delete(user_unlikes_tuit),
        )
        .route("/api/users/:uid/likes", get(find_all_tuits_liked_by_user))
        .route("/api/tuits/:tid/likes", get(find_all_users_that_liked_tuit))
        .route("/api/tuits/:tid/likes/count", get(count_how_many_liked_tuit))
}

async fn user_likes_tuit(
    State(state): State<Arc<AppState>>,
    Path((uid, tid)): Path<(String, String)>,
) -> Result<Json<Like>> {
    Ok(Json(state.likes.user_likes_tuit(&uid, &tid).await?))
}

async fn user_unlikes_tuit(
    State(state): State<Arc<AppState>>,
    Path((uid, tid)): Path<(String, String)>,
) -> Result<Json<DeleteResult>> {
    Ok(Json(state.likes.user_unlikes_tuit(&uid, &tid).await?))
}

async fn find_user_likes_tuit(
    State(state): State<Arc<AppState>>,
    Path((uid, tid)): Path<(String, String)>,
) -> Result<Json<Option<Like>>> {
    Ok(Json(state.likes.find_user_likes_tuit(&uid, &tid).await?))
}

async fn find_all_tuits_liked_by_user(
    State(state): State<Arc<AppState>>,
    Path(uid): Path<String>,
) -> Result<Json<Vec<Like>>> {
    Ok(Json(state.likes.find_all_tuits_liked_by_user(&uid).await?))
}

async fn find_all_users_that_liked_tuit(
    State(state): State<Arc<AppState>>,
    Path(tid): Path<String>,
) -> Result<Json<Vec<Like>>> {
    Ok(Json(state.likes.find_all_users_that_liked_tuit(&tid).await?))
}

async fn count_how_many_liked_tuit(
    State(state): State<Arc<AppState>>,
    Path(tid): Path<String>,
) -> Result<Json<Count>> {
    let count = state.likes.count_how_many_liked_tuit(&tid).await?;
    Ok(Json(Count { count }))
}

#[cfg(test)]
mod tests {
    use crate::api::testing::{create_tuit, create_user, send, test_app};
    use axum::http::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_like_routes() {
        let (app, _) = test_app().await;
        let author = create_user(&app, "author").await;
        let fan = create_user(&app, "fan").await;
        let tid = create_tuit(&app, &author, "likeable").await;
        let path = format!("/api/users/{}/likes/{}", fan, tid);

        let (_, none) = send(&app, Method::GET, &path, None).await;
        assert!(none.is_null());

        let (_, like) = send(&app, Method::POST, &path, None).await;
        assert_eq!(like["likedBy"], json!(fan));

        let (_, found) = send(&app, Method::GET, &path, None).await;
        assert_eq!(found["_id"], like["_id"]);

        let (_, count) =
            send(&app, Method::GET, &format!("/api/tuits/{}/likes/count", tid), None).await;
        assert_eq!(count, json!({"count": 1}));

        let (_, liked) =
            send(&app, Method::GET, &format!("/api/users/{}/likes", fan), None).await;
        assert_eq!(liked[0]["tuit"]["postedBy"]["username"], "author");

        let (_, likers) =
            send(&app, Method::GET, &format!("/api/tuits/{}/likes", tid), None).await;
        assert_eq!(likers[0]["likedBy"]["username"], "fan");

        let (_, deleted) = send(&app, Method::DELETE, &path, None).await;
        assert_eq!(deleted["deletedCount"], 1);
    }
}
