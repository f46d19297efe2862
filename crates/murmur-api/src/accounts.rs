use axum::{Json, extract::State, http::StatusCode};
use tracing::{debug, error};

use murmur_db::error::StoreError;
use murmur_types::api::Credentials;
use murmur_types::models::Account;

use crate::AppState;

/// POST /register — 200 with the created account, 400 on empty/duplicate
/// username or short password. Storage trouble is logged but collapses to
/// the same 400; the wire contract does not distinguish them.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<Credentials>,
) -> Result<Json<Account>, StatusCode> {
    match state.accounts.register(&req.username, &req.password) {
        Ok(account) => Ok(Json(account)),
        Err(StoreError::Rejected(reason)) => {
            debug!("registration rejected: {}", reason);
            Err(StatusCode::BAD_REQUEST)
        }
        Err(err) => {
            error!("registration failed: {}", err);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

/// POST /login — 200 with the stored account on an exact credential match,
/// 401 otherwise.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<Credentials>,
) -> Result<Json<Account>, StatusCode> {
    match state.accounts.login(&req.username, &req.password) {
        Ok(Some(account)) => Ok(Json(account)),
        Ok(None) => Err(StatusCode::UNAUTHORIZED),
        Err(err) => {
            error!("login failed: {}", err);
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}
