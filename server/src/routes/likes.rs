//! Like counter HTTP endpoints.
//!
//! `GET /likes/.json` returns every count as `{ "<articleId>": count }`.
//! `GET /api/likes/register?id=<articleId>` registers one like; ids that
//! name no published article get `404`.

#[cfg(test)]
#[path = "likes_test.rs"]
mod likes_test;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use blog_wire::{LikeCounts, RegisterQuery};
use tracing::warn;

use crate::services::likes::{self, LikesError};
use crate::state::AppState;

pub async fn counts(State(state): State<AppState>) -> Json<LikeCounts> {
    Json(likes::snapshot(&state).await)
}

pub async fn register(State(state): State<AppState>, Query(query): Query<RegisterQuery>) -> StatusCode {
    let Some(article_id) = query.article_id() else {
        return StatusCode::BAD_REQUEST;
    };
    match likes::register(&state, article_id).await {
        Ok(_) => StatusCode::NO_CONTENT,
        Err(e) => {
            warn!(error = %e, "like registration rejected");
            likes_error_to_status(&e)
        }
    }
}

pub(crate) fn likes_error_to_status(err: &LikesError) -> StatusCode {
    match err {
        LikesError::MissingId | LikesError::IdTooLong => StatusCode::BAD_REQUEST,
        LikesError::UnknownArticle(_) => StatusCode::NOT_FOUND,
        LikesError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
