//! RESTful API for the unlikes resource
//!
//! Same shape as the likes routes, under `unlikes`.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use super::Count;
use crate::core::app_state::AppState;
use crate::core::error::Result;
use crate::models::Unlike;
use crate::storage::DeleteResult;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/users/:uid/unlikes/:tid",
            get(find_user_unlikes_tuit)
                .post(user_unlikes_tuit)
                .delete(user_undoes_unlike),
        )
        .route("/api/users/:uid/unlikes", get(find_all_tuits_unliked_by_user))
        .route(
            "/api/tuits/:tid/unlikes",
            get(find_all_users_that_unliked_tuit),
        )
        .route(
            "/api/tuits/:tid/unlikes/count",
            get(count_how_many_unliked_tuit),
        )
}

async fn user_unlikes_tuit(
    State(state): State<Arc<AppState>>,
    Path((uid, tid)): Path<(String, String)>,
) -> Result<Json<Unlike>> {
    Ok(Json(state.unlikes.user_unlikes_tuit(&uid, &tid).await?))
}

async fn user_undoes_unlike(
    State(state): State<Arc<AppState>>,
    Path((uid, tid)): Path<(String, String)>,
) -> Result<Json<DeleteResult>> {
    Ok(Json(state.unlikes.user_undoes_unlike(&uid, &tid).await?))
}

async fn find_user_unlikes_tuit(
    State(state): State<Arc<AppState>>,
    Path((uid, tid)): Path<(String, String)>,
) -> Result<Json<Option<Unlike>>> {
    Ok(Json(state.unlikes.find_user_unlikes_tuit(&uid, &tid).await?))
}

async fn find_all_tuits_unliked_by_user(
    State(state): State<Arc<AppState>>,
    Path(uid): Path<String>,
) -> Result<Json<Vec<Unlike>>> {
    Ok(Json(state.unlikes.find_all_tuits_unliked_by_user(&uid).await?))
}

async fn find_all_users_that_unliked_tuit(
    State(state): State<Arc<AppState>>,
    Path(tid): Path<String>,
) -> Result<Json<Vec<Unlike>>> {
    Ok(Json(
        state.unlikes.find_all_users_that_unliked_tuit(&tid).await?,
    ))
}

async fn count_how_many_unliked_tuit(
    State(state): State<Arc<AppState>>,
    Path(tid): Path<String>,
) -> Result<Json<Count>> {
    let count = state.unlikes.count_how_many_unliked_tuit(&tid).await?;
    Ok(Json(Count { count }))
}
