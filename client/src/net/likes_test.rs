use super::*;

use std::cell::Cell;
use std::rc::Rc;

use futures::executor::block_on;
use futures::future::{pending, ready};

// =============================================================
// Subscription
// =============================================================

#[test]
fn subscription_drop_cancels_once() {
    let cancels = Rc::new(Cell::new(0));
    let counter = Rc::clone(&cancels);
    let subscription = Subscription::new(move || counter.set(counter.get() + 1));
    drop(subscription);
    assert_eq!(cancels.get(), 1);
}

#[test]
fn subscription_unsubscribe_does_not_cancel_again_on_drop() {
    let cancels = Rc::new(Cell::new(0));
    let counter = Rc::clone(&cancels);
    Subscription::new(move || counter.set(counter.get() + 1)).unsubscribe();
    assert_eq!(cancels.get(), 1);
}

#[test]
fn inert_subscription_is_inactive() {
    assert_eq!(format!("{:?}", Subscription::inert()), "Subscription { active: false }");
}

// =============================================================
// race_timeout
// =============================================================

#[test]
fn race_timeout_returns_request_result() {
    let limit = Duration::from_secs(1);
    let result = block_on(race_timeout(limit, ready(Ok::<_, LikeError>(5_u64)), pending::<()>()));
    assert_eq!(result.expect("request wins"), 5);
}

#[test]
fn race_timeout_passes_request_errors_through() {
    let limit = Duration::from_secs(1);
    let result = block_on(race_timeout(limit, ready(Err::<u64, _>(LikeError::Status(503))), pending::<()>()));
    assert!(matches!(result, Err(LikeError::Status(503))));
}

#[test]
fn race_timeout_reports_deadline() {
    let limit = Duration::from_millis(250);
    let result = block_on(race_timeout(limit, pending::<Result<u64, LikeError>>(), ready(())));
    match result {
        Err(LikeError::Timeout(after)) => assert_eq!(after, limit),
        other => panic!("expected timeout, got {other:?}"),
    }
}

// =============================================================
// socket_url
// =============================================================

#[test]
fn socket_url_uses_wss_on_https_pages() {
    assert_eq!(
        socket_url("https://blog.dev/posts/a", "blog.dev", "/api/likes/live?id=a"),
        "wss://blog.dev/api/likes/live?id=a"
    );
}

#[test]
fn socket_url_uses_ws_on_http_pages() {
    assert_eq!(socket_url("http://localhost:3000/", "localhost:3000", "/live"), "ws://localhost:3000/live");
}

#[test]
fn socket_url_keeps_absolute_socket_urls() {
    assert_eq!(socket_url("https://a", "a", "wss://push.example/live"), "wss://push.example/live");
}

// =============================================================
// LikesEndpoints / HttpLikesBackend
// =============================================================

#[test]
fn endpoints_default_to_same_origin_paths() {
    let endpoints = LikesEndpoints::default();
    assert_eq!(endpoints.counts_url, "/likes/.json");
    assert_eq!(endpoints.register_url, "/api/likes/register");
    assert_eq!(endpoints.live_url, "/api/likes/live");
    assert_eq!(endpoints.timeout, Duration::from_secs(8));
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn http_backend_degrades_without_browser() {
    let backend = HttpLikesBackend::default();
    assert_eq!(block_on(backend.fetch_like_count("a")), None);
    assert!(matches!(block_on(backend.register_like("a")), Err(LikeError::Unavailable)));
    let subscription = backend.subscribe_like_count("a", Box::new(|_| {}));
    assert_eq!(format!("{subscription:?}"), "Subscription { active: false }");
}
