use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::auth::{password, tokens};
use crate::db::StoreError;
use crate::error::{AppError, AppResult};
use crate::routes::auth_header;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/login", post(login))
        .route("/api/refresh", post(refresh))
        .route("/api/revoke", post(revoke))
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
    /// Session TTL requested by the client; zero or absent means the
    /// 24-hour default.
    #[serde(default)]
    expires_in_seconds: i64,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    id: i64,
    email: String,
    is_upgraded: bool,
    token: String,
    refresh_token: String,
}

#[derive(Debug, Serialize)]
struct RefreshResponse {
    token: String,
    refresh_token: String,
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    // an unknown email reads the same as a wrong password
    let user = match state.db.get_user_by_email(&req.email) {
        Ok(user) => user,
        Err(StoreError::NotFound(_)) => return Err(AppError::Unauthorized),
        Err(err) => return Err(err.into()),
    };
    password::verify_password(&req.password, &user.password_hash)?;

    let token = tokens::issue_session_token(user.id, &state.jwt_secret, req.expires_in_seconds)?;
    let (refresh_token, expires_at) = tokens::generate_refresh_token();
    state
        .db
        .issue_refresh_token(user.id, &refresh_token, expires_at)?;

    Ok(Json(LoginResponse {
        id: user.id,
        email: user.email,
        is_upgraded: user.is_upgraded,
        token,
        refresh_token,
    }))
}

/// Exchange a live refresh token for a fresh session token. The refresh
/// token itself is rotated: the presented one is replaced and returned
/// anew in the response.
async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<RefreshResponse>> {
    let presented = tokens::extract_bearer_token(auth_header(&headers))?;

    let (user, record) = match state.db.resolve_refresh_token(presented) {
        Ok(found) => found,
        Err(StoreError::NotFound(_)) => return Err(AppError::Unauthorized),
        Err(err) => return Err(err.into()),
    };
    // expiry is only ever checked here, at use time
    if record.expires_at < Utc::now() {
        return Err(AppError::Unauthorized);
    }

    let token = tokens::issue_session_token(user.id, &state.jwt_secret, 0)?;
    let (refresh_token, expires_at) = tokens::generate_refresh_token();
    state
        .db
        .issue_refresh_token(user.id, &refresh_token, expires_at)?;

    Ok(Json(RefreshResponse {
        token,
        refresh_token,
    }))
}

async fn revoke(State(state): State<AppState>, headers: HeaderMap) -> AppResult<StatusCode> {
    let presented = tokens::extract_bearer_token(auth_header(&headers))?;

    match state.db.revoke_refresh_token(presented) {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(StoreError::NotFound(_)) => Err(AppError::Unauthorized),
        Err(err) => Err(err.into()),
    }
}
