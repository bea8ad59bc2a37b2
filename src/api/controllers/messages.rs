//! RESTful API for the messages resource
//!
//! - `POST /api/users/:sid/messages/:rid` send a message
//! - `DELETE /api/messages/:mid` delete a message
//! - `GET /api/users/:uid/messagessent` messages sent by a user
//! - `GET /api/users/:uid/messagesreceived` messages received by a user

use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

use crate::core::app_state::AppState;
use crate::core::error::Result;
use crate::models::Message;
use crate::storage::DeleteResult;

/// Body of a send-message request
#[derive(Debug, Deserialize)]
pub struct NewMessage {
    pub message: String,
}

pub fn routes() -> Router<Arc<AppState>> {
    // The sender segment shares the `:uid` name with the other user routes.
    Router::new()
        .route("/api/users/:uid/messages/:rid", post(user_messages_user))
        .route("/api/messages/:mid", delete(user_deletes_message))
        .route(
            "/api/users/:uid/messagessent",
            get(find_all_messages_sent_by_user),
        )
        .route(
            "/api/users/:uid/messagesreceived",
            get(find_all_messages_received_by_user),
        )
}

async fn user_messages_user(
    State(state): State<Arc<AppState>>,
    Path((sid, rid)): Path<(String, String)>,
    Json(body): Json<NewMessage>,
) -> Result<Json<Message>> {
    let message = state
        .messages
        .user_messages_user(&sid, &rid, &body.message, Utc::now())
        .await?;
    Ok(Json(message))
}

async fn user_deletes_message(
    State(state): State<Arc<AppState>>,
    Path(mid): Path<String>,
) -> Result<Json<DeleteResult>> {
    Ok(Json(state.messages.user_deletes_message(&mid).await?))
}

async fn find_all_messages_sent_by_user(
    State(state): State<Arc<AppState>>,
    Path(uid): Path<String>,
) -> Result<Json<Vec<Message>>> {
    Ok(Json(state.messages.find_all_messages_sent_by_user(&uid).await?))
}

async fn find_all_messages_received_by_user(
    State(state): State<Arc<AppState>>,
    Path(uid): Path<String>,
) -> Result<Json<Vec<Message>>> {
    Ok(Json(
        state.messages.find_all_messages_received_by_user(&uid).await?,
    ))
}
