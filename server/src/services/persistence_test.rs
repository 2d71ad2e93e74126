use super::*;
use crate::services::likes;
use crate::state::test_helpers;

// =============================================================================
// env_parse
// =============================================================================

#[test]
fn env_parse_missing_returns_default() {
    let val: usize = env_parse("__TEST_NONEXISTENT_KEY_12345__", 42);
    assert_eq!(val, 42);
}

#[test]
fn env_parse_present_valid() {
    unsafe { std::env::set_var("__TEST_EP_VALID__", "99") };
    let val: usize = env_parse("__TEST_EP_VALID__", 0);
    assert_eq!(val, 99);
    unsafe { std::env::remove_var("__TEST_EP_VALID__") };
}

#[test]
fn env_parse_present_invalid_returns_default() {
    unsafe { std::env::set_var("__TEST_EP_INVALID__", "notanumber") };
    let val: usize = env_parse("__TEST_EP_INVALID__", 7);
    assert_eq!(val, 7);
    unsafe { std::env::remove_var("__TEST_EP_INVALID__") };
}

// =============================================================================
// spawn / flush
// =============================================================================

#[tokio::test]
async fn spawn_without_pool_returns_none() {
    let state = test_helpers::test_app_state();
    assert!(spawn_persistence_task(state).is_none());
}

#[tokio::test]
async fn flush_with_nothing_dirty_skips_database() {
    let state = test_helpers::test_app_state_with_dead_pool();
    let pool = state.pool.clone().expect("dead pool configured");
    test_helpers::seed_likes(&state, &[("a", 3)]).await;
    assert_eq!(flush_dirty(&state, &pool).await, 0);
}

#[tokio::test]
async fn flush_failure_keeps_dirty_flags() {
    let state = test_helpers::test_app_state_with_dead_pool();
    let pool = state.pool.clone().expect("dead pool configured");
    likes::register(&state, "a").await.expect("valid id");

    assert_eq!(flush_dirty(&state, &pool).await, 0);
    assert!(state.likes.read().await.dirty.contains("a"));
}

#[tokio::test]
async fn clear_flushed_keeps_articles_that_moved() {
    let state = test_helpers::test_app_state();
    likes::register(&state, "a").await.expect("valid id");
    likes::register(&state, "b").await.expect("valid id");
    let flushed = vec![("a".to_owned(), 1), ("b".to_owned(), 1)];
    likes::register(&state, "b").await.expect("valid id");

    clear_flushed(&state, &flushed).await;

    let likes = state.likes.read().await;
    assert!(!likes.dirty.contains("a"));
    assert!(likes.dirty.contains("b"));
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
async fn flush_writes_dirty_counts_to_live_db() {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL for live-db-tests");
    let pool = crate::db::init_pool(&url).await.expect("live database");
    let state = crate::state::AppState::new(Some(pool.clone()), crate::services::content::Catalog::default());
    let id = format!("test-{}", uuid::Uuid::new_v4());
    likes::register(&state, &id).await.expect("valid id");

    assert_eq!(flush_dirty(&state, &pool).await, 1);
    assert!(state.likes.read().await.dirty.is_empty());
    let stored = likes::load_counts(&pool).await.expect("load");
    assert_eq!(stored.get(&id), Some(&1));
    sqlx::query("DELETE FROM likes WHERE article_id = $1").bind(&id).execute(&pool).await.expect("cleanup");
}
