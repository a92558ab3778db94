use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use crate::auth::tokens;
use crate::error::{AppError, AppResult};
use crate::routes::auth_header;
use crate::state::AppState;

const USER_UPGRADED_EVENT: &str = "user.upgraded";

pub fn router() -> Router<AppState> {
    Router::new().route("/api/webhooks/upgrade", post(upgrade))
}

#[derive(Debug, Deserialize)]
struct UpgradeEvent {
    event: String,
    data: UpgradeData,
}

#[derive(Debug, Deserialize)]
struct UpgradeData {
    user_id: i64,
}

/// Payment-provider webhook. Requires the shared `ApiKey` credential;
/// events other than `user.upgraded` are acknowledged and ignored.
async fn upgrade(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<UpgradeEvent>,
) -> AppResult<StatusCode> {
    let presented = tokens::extract_api_key(auth_header(&headers))?;
    let expected = state
        .config
        .auth
        .polka_key
        .as_deref()
        .ok_or(AppError::Unauthorized)?;
    if presented != expected {
        return Err(AppError::Unauthorized);
    }

    if payload.event != USER_UPGRADED_EVENT {
        return Ok(StatusCode::NO_CONTENT);
    }

    state.db.upgrade_user(payload.data.user_id)?;
    Ok(StatusCode::NO_CONTENT)
}
