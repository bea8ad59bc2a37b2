//! Resource controllers
//!
//! Each controller exposes `routes()`, called once when the router is built.

use axum::Router;
use serde::Serialize;
use std::sync::Arc;

use crate::core::app_state::AppState;

pub mod bookmarks;
pub mod dislikes;
pub mod follows;
pub mod likes;
pub mod messages;
pub mod tuits;
pub mod unlikes;
pub mod users;

/// Body of the `.../count` routes
#[derive(Debug, Serialize)]
pub struct Count {
    pub count: u64,
}

/// Every resource route
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(users::routes())
        .merge(tuits::routes())
        .merge(likes::routes())
        .merge(dislikes::routes())
        .merge(unlikes::routes())
        .merge(follows::routes())
        .merge(bookmarks::routes())
        .merge(messages::routes())
}
