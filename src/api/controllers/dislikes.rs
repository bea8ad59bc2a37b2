//! RESTful API for the dislikes resource
//!
//! Same shape as the likes routes, under `dislikes`.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use super::Count;
use crate::core::app_state::AppState;
use crate::core::error::Result;
use crate::models::Dislike;
use crate::storage::DeleteResult;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/users/:uid/dislikes/:tid",
            get(find_user_dislikes_tuit)
                .post(user_dislikes_tuit)
                .delete(user_undislikes_tuit),
        )
        .route(
            "/api/users/:uid/dislikes",
            get(find_all_tuits_disliked_by_user),
        )
        .route(
            "/api/tuits/:tid/dislikes",
            get(find_all_users_that_disliked_tuit),
        )
        .route(
            "/api/tuits/:tid/dislikes/count",
            get(count_how_many_disliked_tuit),
        )
}

async fn user_dislikes_tuit(
    State(state): State<Arc<AppState>>,
    Path((uid, tid)): Path<(String, String)>,
) -> Result<Json<Dislike>> {
    Ok(Json(state.dislikes.user_dislikes_tuit(&uid, &tid).await?))
}

async fn user_undislikes_tuit(
    State(state): State<Arc<AppState>>,
    Path((uid, tid)): Path<(String, String)>,
) -> Result<Json<DeleteResult>> {
    Ok(Json(state.dislikes.user_undislikes_tuit(&uid, &tid).await?))
}

async fn find_user_dislikes_tuit(
    State(state): State<Arc<AppState>>,
    Path((uid, tid)): Path<(String, String)>,
) -> Result<Json<Option<Dislike>>> {
    Ok(Json(state.dislikes.find_user_dislikes_tuit(&uid, &tid).await?))
}

async fn find_all_tuits_disliked_by_user(
    State(state): State<Arc<AppState>>,
    Path(uid): Path<String>,
) -> Result<Json<Vec<Dislike>>> {
    Ok(Json(state.dislikes.find_all_tuits_disliked_by_user(&uid).await?))
}

async fn find_all_users_that_disliked_tuit(
    State(state): State<Arc<AppState>>,
    Path(tid): Path<String>,
) -> Result<Json<Vec<Dislike>>> {
    Ok(Json(
        state.dislikes.find_all_users_that_disliked_tuit(&tid).await?,
    ))
}

async fn count_how_many_disliked_tuit(
    State(state): State<Arc<AppState>>,
    Path(tid): Path<String>,
) -> Result<Json<Count>> {
    let count = state.dislikes.count_how_many_disliked_tuit(&tid).await?;
    Ok(Json(Count { count }))
}

#[cfg(test)]
mod tests {
    use crate::api::testing::{create_tuit, create_user, send, test_app};
    use axum::http::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_disliked_tuits_include_author() {
        let (app, _) = test_app().await;
        let author = create_user(&app, "author").await;
        let critic = create_user(&app, "critic").await;
        let tid = create_tuit(&app, &author, "controversial").await;

        send(
            &app,
            Method::POST,
            &format!("/api/users/{}/dislikes/{}", critic, tid),
            None,
        )
        .await;

        let (_, disliked) =
            send(&app, Method::GET, &format!("/api/users/{}/dislikes", critic), None).await;
        assert_eq!(disliked[0]["tuit"]["tuit"], "controversial");
        assert_eq!(disliked[0]["tuit"]["postedBy"]["username"], "author");
        assert_eq!(disliked[0]["dislikedBy"], json!(critic));

        let (_, count) = send(
            &app,
            Method::GET,
            &format!("/api/tuits/{}/dislikes/count", tid),
            None,
        )
        .await;
        assert_eq!(count["count"], 1);
    }
}
