pub mod admin;
pub mod chirps;
pub mod health;
pub mod sessions;
pub mod users;
pub mod webhooks;

use axum::http::{header, HeaderMap};
use axum::Router;

use crate::auth::tokens;
use crate::error::AppResult;
use crate::state::AppState;

/// The complete application. The static site under /app passes through the
/// hit counter; API and admin routes do not count as visits.
pub fn app(state: AppState) -> Router {
    let site = Router::new()
        .nest_service(
            "/app",
            tower_http::services::ServeDir::new(&state.config.server.static_dir),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            admin::track_hits,
        ));

    Router::new()
        .merge(admin::router())
        .merge(health::router())
        .merge(users::router())
        .merge(sessions::router())
        .merge(chirps::router())
        .merge(webhooks::router())
        .merge(site)
        .with_state(state)
}

pub(crate) fn auth_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
}

/// Authenticate a request: parse the bearer header and validate the session
/// token, yielding the caller's user id.
pub(crate) fn authenticated_user(state: &AppState, headers: &HeaderMap) -> AppResult<i64> {
    let token = tokens::extract_bearer_token(auth_header(headers))?;
    let user_id = tokens::validate_session_token(token, &state.jwt_secret)?;
    Ok(user_id)
}
