//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! JSON API routes live under `/api`. Everything else falls through to the
//! static website directory, which holds the HTML pages and the cursor's
//! wasm bundle.

pub mod blog;
pub mod contact;

use std::path::Path;

use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// `{"error": message}` with the given status.
pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

/// API routes only, without static fallback.
pub fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/blog", get(blog::list_posts))
        .route("/api/blog/{slug}", get(blog::get_post))
        .route("/api/contact", post(contact::submit))
        .layer(cors)
        .with_state(state)
}

/// Full application router: API plus static website.
pub fn app(state: AppState, website_dir: &Path) -> Router {
    let website = ServeDir::new(website_dir).append_index_html_on_directories(true);

    api_routes(state)
        .fallback_service(website)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
