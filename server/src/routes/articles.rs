//! Content API: article list, single article, taxonomy counts and the
//! articles filed under one tag or category.

#[cfg(test)]
#[path = "articles_test.rs"]
mod articles_test;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use blog_wire::{Article, ArticleSummary, TermCount};

use crate::state::AppState;

/// Published articles, oldest first.
pub async fn list_articles(State(state): State<AppState>) -> Json<Vec<ArticleSummary>> {
    Json(state.catalog.summaries())
}

pub async fn get_article(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Json<Article>, StatusCode> {
    state.catalog.find(&slug).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

pub async fn list_tags(State(state): State<AppState>) -> Json<Vec<TermCount>> {
    Json(state.catalog.tags().to_vec())
}

pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<TermCount>> {
    Json(state.catalog.categories().to_vec())
}

/// Articles carrying one tag; unknown tags are `404`.
pub async fn list_tagged(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Result<Json<Vec<ArticleSummary>>, StatusCode> {
    non_empty(state.catalog.tagged(&tag))
}

/// Articles in one category; unknown categories are `404`.
pub async fn list_in_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<ArticleSummary>>, StatusCode> {
    non_empty(state.catalog.in_category(&category))
}

fn non_empty(list: Vec<ArticleSummary>) -> Result<Json<Vec<ArticleSummary>>, StatusCode> {
    if list.is_empty() { Err(StatusCode::NOT_FOUND) } else { Ok(Json(list)) }
}
