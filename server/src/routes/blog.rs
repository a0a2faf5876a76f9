//! Blog routes: post list and single post as JSON.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;

use super::error_response;
use crate::services::blog::{self, BlogError};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Return only the N most recent posts.
    pub limit: Option<usize>,
}

/// `GET /api/blog` — all posts, newest first.
pub async fn list_posts(State(state): State<AppState>, Query(query): Query<ListQuery>) -> Response {
    match state.blog.all().await {
        Ok(posts) => {
            let posts = match query.limit {
                Some(n) => blog::recent_posts(&posts, n),
                None => posts.as_slice(),
            };
            Json(posts).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to load blog posts");
            error_response(blog_error_to_status(&e), "Failed to load posts")
        }
    }
}

/// `GET /api/blog/{slug}` — one post or 404.
pub async fn get_post(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match state.blog.by_slug(&slug).await {
        Ok(Some(post)) => Json(post).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "Not found"),
        Err(e) => {
            tracing::error!(error = %e, %slug, "failed to load blog post");
            error_response(blog_error_to_status(&e), "Failed to load post")
        }
    }
}

/// Every loader failure is a server-side authoring or io problem.
pub(crate) fn blog_error_to_status(_err: &BlogError) -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

#[cfg(test)]
#[path = "blog_test.rs"]
mod tests;
