//! Like counter service: increments, snapshots and live fan-out.
//!
//! DESIGN
//! ======
//! Counts live in `AppState::likes`. A registration bumps the count, marks
//! the article dirty for the persistence task and broadcasts the new value
//! to every live socket. Postgres is only read at startup (`restore`) and
//! written by the flush loop.
//!
//! ERROR HANDLING
//! ==============
//! Registration only fails on a bad or unknown article id. Database errors surface from
//! `restore`/`upsert_counts` and are handled by their callers.

#[cfg(test)]
#[path = "likes_test.rs"]
mod likes_test;

use blog_wire::{LikeCounts, LikeUpdate};
use sqlx::PgPool;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::state::AppState;

/// Longest article id accepted for registration.
pub const MAX_ARTICLE_ID_LEN: usize = 200;

#[derive(Debug, thiserror::Error)]
pub enum LikesError {
    #[error("article id is required")]
    MissingId,
    #[error("article id is longer than {} bytes", MAX_ARTICLE_ID_LEN)]
    IdTooLong,
    #[error("unknown article: {0}")]
    UnknownArticle(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Register one like for `article_id` and return the new count.
///
/// # Errors
///
/// Returns [`LikesError`] if the id is blank or too long, or names no
/// published article. An empty catalog accepts any id.
pub async fn register(state: &AppState, article_id: &str) -> Result<u64, LikesError> {
    let article_id = article_id.trim();
    if article_id.is_empty() {
        return Err(LikesError::MissingId);
    }
    if article_id.len() > MAX_ARTICLE_ID_LEN {
        return Err(LikesError::IdTooLong);
    }
    if !state.catalog.is_empty() && !state.catalog.contains_id(article_id) {
        return Err(LikesError::UnknownArticle(article_id.to_owned()));
    }

    let count = {
        let mut likes = state.likes.write().await;
        let count = likes.counts.entry(article_id.to_owned()).or_default();
        *count = count.saturating_add(1);
        let count = *count;
        likes.dirty.insert(article_id.to_owned());
        count
    };

    // No receivers just means no open sockets.
    let receivers = state.like_updates.send(LikeUpdate::new(article_id, count)).unwrap_or(0);
    debug!(%article_id, count, receivers, "like registered");
    Ok(count)
}

/// Current count for one article.
pub async fn count(state: &AppState, article_id: &str) -> Option<u64> {
    state.likes.read().await.counts.get(article_id).copied()
}

/// Every known count.
pub async fn snapshot(state: &AppState) -> LikeCounts {
    state.likes.read().await.counts.clone()
}

/// Receive every count change from now on.
#[must_use]
pub fn subscribe(state: &AppState) -> broadcast::Receiver<LikeUpdate> {
    state.like_updates.subscribe()
}

/// Load persisted counts into memory. Counts registered before the load
/// finishes are kept when higher.
///
/// # Errors
///
/// Returns [`LikesError::Database`] if the query fails.
pub async fn restore(state: &AppState) -> Result<usize, LikesError> {
    let Some(pool) = &state.pool else {
        return Ok(0);
    };
    let stored = load_counts(pool).await?;
    let loaded = stored.len();
    let mut likes = state.likes.write().await;
    for (article_id, stored_count) in stored {
        let count = likes.counts.entry(article_id).or_default();
        *count = (*count).max(stored_count);
    }
    info!(loaded, "like counts restored");
    Ok(loaded)
}

/// Read every row of the `likes` table.
///
/// # Errors
///
/// Returns the underlying `sqlx` error.
pub async fn load_counts(pool: &PgPool) -> Result<LikeCounts, sqlx::Error> {
    let rows = sqlx::query_as::<_, (String, i64)>("SELECT article_id, count FROM likes")
        .fetch_all(pool)
        .await?;
    Ok(rows
        .into_iter()
        .map(|(article_id, count)| (article_id, u64::try_from(count).unwrap_or(0)))
        .collect())
}

/// Upsert a batch of counts in one transaction.
///
/// # Errors
///
/// Returns the underlying `sqlx` error; nothing is committed on failure.
pub async fn upsert_counts(pool: &PgPool, counts: &[(String, u64)]) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for (article_id, count) in counts {
        sqlx::query(
            "INSERT INTO likes (article_id, count, updated_at) VALUES ($1, $2, now())
             ON CONFLICT (article_id) DO UPDATE SET count = EXCLUDED.count, updated_at = now()",
        )
        .bind(article_id)
        .bind(i64::try_from(*count).unwrap_or(i64::MAX))
        .execute(tx.as_mut())
        .await?;
    }
    tx.commit().await?;
    Ok(())
}
