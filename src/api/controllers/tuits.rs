//! RESTful API for the tuits resource
//!
//! - `POST /api/users/:uid/tuits` post a tuit as a user
//! - `GET /api/users/:uid/tuits` tuits posted by a user
//! - `GET /api/tuits` every tuit
//! - `GET /api/tuits/:tid` one tuit with its author
//! - `PUT /api/tuits/:tid` edit a tuit
//! - `DELETE /api/tuits/:tid` remove a tuit

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use crate::core::app_state::AppState;
use crate::core::error::Result;
use crate::models::{NewTuit, Tuit, TuitChanges};
use crate::storage::{DeleteResult, UpdateResult};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/users/:uid/tuits",
            get(find_tuits_by_user).post(create_tuit),
        )
        .route("/api/tuits", get(find_all_tuits))
        .route(
            "/api/tuits/:tid",
            get(find_tuit_by_id).put(update_tuit).delete(delete_tuit),
        )
}

async fn create_tuit(
    State(state): State<Arc<AppState>>,
    Path(uid): Path<String>,
    Json(body): Json<NewTuit>,
) -> Result<Json<Tuit>> {
    Ok(Json(state.tuits.create_tuit(&uid, body).await?))
}

async fn find_tuits_by_user(
    State(state): State<Arc<AppState>>,
    Path(uid): Path<String>,
) -> Result<Json<Vec<Tuit>>> {
    Ok(Json(state.tuits.find_tuits_by_user(&uid).await?))
}

async fn find_all_tuits(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Tuit>>> {
    Ok(Json(state.tuits.find_all_tuits().await?))
}

async fn find_tuit_by_id(
    State(state): State<Arc<AppState>>,
    Path(tid): Path<String>,
) -> Result<Json<Option<Tuit>>> {
    Ok(Json(state.tuits.find_tuit_by_id(&tid).await?))
}

async fn update_tuit(
    State(state): State<Arc<AppState>>,
    Path(tid): Path<String>,
    Json(changes): Json<TuitChanges>,
) -> Result<Json<UpdateResult>> {
    Ok(Json(state.tuits.update_tuit(&tid, changes).await?))
}

async fn delete_tuit(
    State(state): State<Arc<AppState>>,
    Path(tid): Path<String>,
) -> Result<Json<DeleteResult>> {
    Ok(Json(state.tuits.delete_tuit(&tid).await?))
}
