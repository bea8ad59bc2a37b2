//! RESTful API for the bookmarks resource
//!
//! - `POST /api/users/:uid/bookmarks/:tid` bookmark a tuit
//! - `DELETE /api/users/:uid/bookmarks/:tid` remove a bookmark
//! - `GET /api/users/:uid/bookmarks` tuits bookmarked by a user

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use crate::core::app_state::AppState;
use crate::core::error::Result;
use crate::models::Bookmark;
use crate::storage::DeleteResult;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/users/:uid/bookmarks/:tid",
            post(user_bookmarks_tuit).delete(user_unbookmarks_tuit),
        )
        .route(
            "/api/users/:uid/bookmarks",
            get(find_all_tuits_bookmarked_by_user),
        )
}

async fn user_bookmarks_tuit(
    State(state): State<Arc<AppState>>,
    Path((uid, tid)): Path<(String, String)>,
) -> Result<Json<Bookmark>> {
    Ok(Json(state.bookmarks.user_bookmarks_tuit(&uid, &tid).await?))
}

async fn user_unbookmarks_tuit(
    State(state): State<Arc<AppState>>,
    Path((uid, tid)): Path<(String, String)>,
) -> Result<Json<DeleteResult>> {
    Ok(Json(state.bookmarks.user_unbookmarks_tuit(&uid, &tid).await?))
}

async fn find_all_tuits_bookmarked_by_user(
    State(state): State<Arc<AppState>>,
    Path(uid): Path<String>,
) -> Result<Json<Vec<Bookmark>>> {
    Ok(Json(
        state.bookmarks.find_all_tuits_bookmarked_by_user(&uid).await?,
    ))
}

#[cfg(test)]
mod tests {
    use crate::api::testing::{create_tuit, create_user, send, test_app};
    use axum::http::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_bookmark_routes() {
        let (app, _) = test_app().await;
        let uid = create_user(&app, "reader").await;
        let tid = create_tuit(&app, &uid, "worth keeping").await;
        let path = format!("/api/users/{}/bookmarks/{}", uid, tid);

        let (_, bookmark) = send(&app, Method::POST, &path, None).await;
        assert_eq!(bookmark["user"], json!(uid));
        assert_eq!(bookmark["tuit"], json!(tid));

        let (_, bookmarks) =
            send(&app, Method::GET, &format!("/api/users/{}/bookmarks", uid), None).await;
        assert_eq!(bookmarks[0]["tuit"]["tuit"], "worth keeping");

        let (_, deleted) = send(&app, Method::DELETE, &path, None).await;
        assert_eq!(deleted["deletedCount"], 1);
    }
}
