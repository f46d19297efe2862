use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

use murmur_db::error::StoreError;
use murmur_types::api::{CreateMessageRequest, UpdateMessageRequest};
use murmur_types::models::Message;

use crate::AppState;

/// POST /messages — 200 with the created message, 400 if the text is empty
/// or over 255 characters.
pub async fn create_message(
    State(state): State<AppState>,
    Json(req): Json<CreateMessageRequest>,
) -> Result<Json<Message>, StatusCode> {
    match state.messages.create(&req) {
        Ok(message) => Ok(Json(message)),
        Err(StoreError::Rejected(reason)) => {
            debug!("message rejected: {}", reason);
            Err(StatusCode::BAD_REQUEST)
        }
        Err(err) => {
            error!("message creation failed: {}", err);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

/// GET /messages — always 200; a storage failure is logged and surfaces as
/// an empty list.
pub async fn get_all_messages(State(state): State<AppState>) -> Json<Vec<Message>> {
    Json(state.messages.all().unwrap_or_else(|err| {
        error!("listing messages failed: {}", err);
        Vec::new()
    }))
}

/// GET /messages/{message_id} — 200 with the message, or 200 with an empty
/// body when the id is unknown.
pub async fn get_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> Response {
    match state.messages.get(message_id) {
        Ok(Some(message)) => Json(message).into_response(),
        Ok(None) => StatusCode::OK.into_response(),
        Err(err) => {
            error!("message lookup failed: {}", err);
            StatusCode::OK.into_response()
        }
    }
}

/// DELETE /messages/{message_id} — 200 with the record as it stood before
/// deletion, or 200 with an empty body when the id is unknown.
pub async fn delete_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> Response {
    match state.messages.delete(message_id) {
        Ok(Some(message)) => Json(message).into_response(),
        Ok(None) => StatusCode::OK.into_response(),
        Err(err) => {
            error!("message deletion failed: {}", err);
            StatusCode::OK.into_response()
        }
    }
}

/// PATCH /messages/{message_id} — 200 with the refreshed message; 400 when
/// the text fails the [1, 255] gate OR the id does not exist.
pub async fn update_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
    Json(req): Json<UpdateMessageRequest>,
) -> Result<Json<Message>, StatusCode> {
    match state.messages.update_text(message_id, &req.message_text) {
        Ok(message) => Ok(Json(message)),
        Err(StoreError::Rejected(reason)) => {
            debug!("message update rejected: {}", reason);
            Err(StatusCode::BAD_REQUEST)
        }
        Err(StoreError::NotFound) => Err(StatusCode::BAD_REQUEST),
        Err(err) => {
            error!("message update failed: {}", err);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

/// GET /accounts/{account_id}/messages — always 200; an account with no
/// messages yields an empty array.
pub async fn get_messages_by_user(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
) -> Json<Vec<Message>> {
    Json(state.messages.by_user(account_id).unwrap_or_else(|err| {
        error!("listing messages for account {} failed: {}", account_id, err);
        Vec::new()
    }))
}
