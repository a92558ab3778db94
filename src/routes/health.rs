use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/healthz", get(readiness))
}

async fn readiness() -> &'static str {
    "OK"
}
