//! Persistence service: background flush of dirty like counts.
//!
//! DESIGN
//! ======
//! A background task flushes dirty counts in one transaction, then sleeps
//! `LIKES_FLUSH_INTERVAL_MS` before the next cycle. Registration never waits
//! on Postgres.
//!
//! ERROR HANDLING
//! ==============
//! Dirty flags are cleared only after a successful write, and only for
//! articles whose count did not move during the write. Repeated upserts are
//! acceptable, silently dropped likes are not.

#[cfg(test)]
#[path = "persistence_test.rs"]
mod tests;

use std::time::Duration;

use sqlx::PgPool;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::services::likes::upsert_counts;
use crate::state::AppState;

const DEFAULT_LIKES_FLUSH_INTERVAL_MS: u64 = 1_000;

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Spawn the background flush task. Returns `None` without a database.
pub fn spawn_persistence_task(state: AppState) -> Option<JoinHandle<()>> {
    let pool = state.pool.clone()?;
    let flush_interval_ms = env_parse("LIKES_FLUSH_INTERVAL_MS", DEFAULT_LIKES_FLUSH_INTERVAL_MS);
    info!(flush_interval_ms, "like persistence flush configured");
    Some(tokio::spawn(async move {
        loop {
            flush_dirty(&state, &pool).await;
            tokio::time::sleep(Duration::from_millis(flush_interval_ms)).await;
        }
    }))
}

/// Write every dirty count. Returns how many rows were flushed.
pub(crate) async fn flush_dirty(state: &AppState, pool: &PgPool) -> usize {
    // Snapshot under the lock, write without it.
    let batch = {
        let likes = state.likes.read().await;
        likes
            .dirty
            .iter()
            .filter_map(|id| likes.counts.get(id).map(|count| (id.clone(), *count)))
            .collect::<Vec<_>>()
    };
    if batch.is_empty() {
        return 0;
    }

    match upsert_counts(pool, &batch).await {
        Ok(()) => {
            clear_flushed(state, &batch).await;
            batch.len()
        }
        Err(e) => {
            error!(error = %e, count = batch.len(), "like persistence flush failed");
            0
        }
    }
}

async fn clear_flushed(state: &AppState, flushed: &[(String, u64)]) {
    let mut likes = state.likes.write().await;
    for (article_id, flushed_count) in flushed {
        // EDGE: keep dirty flag if the count moved after the snapshot.
        if likes.counts.get(article_id) == Some(flushed_count) {
            likes.dirty.remove(article_id);
        }
    }
}
