use std::sync::atomic::Ordering;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{Html, Response};
use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/metrics", get(metrics))
        .route("/admin/reset", post(reset))
}

/// Middleware that counts visits to the static site.
pub async fn track_hits(State(state): State<AppState>, req: Request, next: Next) -> Response {
    state.hits.fetch_add(1, Ordering::Relaxed);
    next.run(req).await
}

async fn metrics(State(state): State<AppState>) -> Html<String> {
    let hits = state.hits.load(Ordering::Relaxed);
    Html(format!(
        "<html><body><h1>Welcome, Chirpy Admin</h1>\
         <p>Chirpy has been visited {hits} times!</p></body></html>"
    ))
}

async fn reset(State(state): State<AppState>) -> &'static str {
    state.hits.store(0, Ordering::Relaxed);
    "Hits reset to 0"
}
