use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::auth::password;
use crate::db::models::User;
use crate::error::AppResult;
use crate::routes::authenticated_user;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/users", post(create_user).put(update_user))
}

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// User as returned over the API: everything but the password hash.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub is_upgraded: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_upgraded: user.is_upgraded,
        }
    }
}

async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let hash = password::hash_password(&req.password)?;
    let user = state.db.create_user(&req.email, &hash)?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

async fn update_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CredentialsRequest>,
) -> AppResult<Json<UserResponse>> {
    let user_id = authenticated_user(&state, &headers)?;
    let hash = password::hash_password(&req.password)?;
    let user = state.db.update_credentials(user_id, &req.email, &hash)?;
    Ok(Json(user.into()))
}
