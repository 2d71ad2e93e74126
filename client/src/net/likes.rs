//! Remote like counter: one-shot count fetch, like registration and the
//! realtime count subscription.
//!
//! Client-side (hydrate): HTTP via `gloo-net`, realtime via a `gloo-net`
//! websocket driven by a `spawn_local` task.
//! Server-side (SSR) and native tests: fetch resolves to `None`, register
//! reports [`LikeError::Unavailable`], subscribe returns an inert handle.
//!
//! ERROR HANDLING
//! ==============
//! Every request races a timeout. Count reads collapse failures into `None`
//! so the widget keeps showing "unknown"; registration returns a typed error so
//! the caller can apply its rollback policy.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "likes_test.rs"]
mod likes_test;

use std::future::Future;
use std::time::Duration;

const DEFAULT_COUNTS_URL: &str = "/likes/.json";
const DEFAULT_REGISTER_URL: &str = "/api/likes/register";
const DEFAULT_LIVE_URL: &str = "/api/likes/live";
const DEFAULT_TIMEOUT_MS: u64 = 8_000;

/// Failure of a like registration (or of the transport underneath it).
#[derive(Debug, thiserror::Error)]
pub enum LikeError {
    #[error("likes backend is unavailable")]
    Unavailable,
    #[error("request failed: {0}")]
    Request(String),
    #[error("request returned status {0}")]
    Status(u16),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

/// Where the likes backend lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LikesEndpoints {
    /// `GET` returning a JSON map of article id to count.
    pub counts_url: String,
    /// `GET ?id=<article>` registering one like.
    pub register_url: String,
    /// Websocket path streaming `LikeUpdate` messages for `?id=<article>`.
    pub live_url: String,
    pub timeout: Duration,
}

impl Default for LikesEndpoints {
    fn default() -> Self {
        Self {
            counts_url: DEFAULT_COUNTS_URL.to_owned(),
            register_url: DEFAULT_REGISTER_URL.to_owned(),
            live_url: DEFAULT_LIVE_URL.to_owned(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

/// Handle to a realtime subscription. Dropping it unsubscribes exactly once.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self { cancel: Some(Box::new(cancel)) }
    }

    /// A subscription with nothing to release.
    pub fn inert() -> Self {
        Self { cancel: None }
    }

    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("active", &self.cancel.is_some()).finish()
    }
}

/// Remote side of the like counter.
///
/// Futures are `!Send`: the widget drives them on the single UI thread.
#[allow(async_fn_in_trait)]
pub trait LikesBackend {
    /// Current count for `article_id`; `None` when absent or unreachable.
    async fn fetch_like_count(&self, article_id: &str) -> Option<u64>;

    /// Register one like for `article_id`. Not idempotent on the server.
    ///
    /// # Errors
    ///
    /// Returns [`LikeError`] when the request cannot be completed.
    async fn register_like(&self, article_id: &str) -> Result<(), LikeError>;

    /// Push every new count for `article_id` into `on_update` until the
    /// returned handle is dropped.
    fn subscribe_like_count(&self, article_id: &str, on_update: Box<dyn Fn(u64)>) -> Subscription;
}

/// Resolve `request`, or fail with [`LikeError::Timeout`] once `deadline`
/// completes first.
pub async fn race_timeout<T, R, D>(limit: Duration, request: R, deadline: D) -> Result<T, LikeError>
where
    R: Future<Output = Result<T, LikeError>>,
    D: Future<Output = ()>,
{
    use futures::future::{Either, select};

    match select(Box::pin(request), Box::pin(deadline)).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(LikeError::Timeout(limit)),
    }
}

/// Turn a websocket path into an absolute `ws://`/`wss://` URL for the page
/// at `page_href` served from `host`.
#[must_use]
pub fn socket_url(page_href: &str, host: &str, path: &str) -> String {
    if path.starts_with("ws://") || path.starts_with("wss://") {
        return path.to_owned();
    }
    let proto = if page_href.starts_with("https") { "wss" } else { "ws" };
    format!("{proto}://{host}{path}")
}

/// [`LikesBackend`] over HTTP and websockets.
#[derive(Clone, Debug, Default)]
pub struct HttpLikesBackend {
    endpoints: LikesEndpoints,
}

impl HttpLikesBackend {
    #[must_use]
    pub fn new(endpoints: LikesEndpoints) -> Self {
        Self { endpoints }
    }
}

#[cfg(feature = "hydrate")]
impl HttpLikesBackend {
    async fn with_timeout<T>(&self, request: impl Future<Output = Result<T, LikeError>>) -> Result<T, LikeError> {
        let limit = self.endpoints.timeout;
        race_timeout(limit, request, gloo_timers::future::sleep(limit)).await
    }

    async fn get(url: &str) -> Result<gloo_net::http::Response, LikeError> {
        let resp = gloo_net::http::Request::get(url)
            .send()
            .await
            .map_err(|e| LikeError::Request(e.to_string()))?;
        if !resp.ok() {
            return Err(LikeError::Status(resp.status()));
        }
        Ok(resp)
    }
}

impl LikesBackend for HttpLikesBackend {
    async fn fetch_like_count(&self, article_id: &str) -> Option<u64> {
        #[cfg(feature = "hydrate")]
        {
            let request = async {
                let resp = Self::get(&self.endpoints.counts_url).await?;
                resp.json::<blog_wire::LikeCounts>()
                    .await
                    .map_err(|e| LikeError::Request(e.to_string()))
            };
            match self.with_timeout(request).await {
                Ok(counts) => blog_wire::likes::count_for(&counts, article_id),
                Err(e) => {
                    leptos::logging::warn!("likes: count fetch failed: {e}");
                    None
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = article_id;
            None
        }
    }

    async fn register_like(&self, article_id: &str) -> Result<(), LikeError> {
        #[cfg(feature = "hydrate")]
        {
            let url = blog_wire::likes::with_article_query(&self.endpoints.register_url, article_id);
            self.with_timeout(async { Self::get(&url).await.map(|_| ()) }).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = article_id;
            Err(LikeError::Unavailable)
        }
    }

    fn subscribe_like_count(&self, article_id: &str, on_update: Box<dyn Fn(u64)>) -> Subscription {
        #[cfg(feature = "hydrate")]
        {
            let location = web_sys::window().map(|w| w.location());
            let href = location.as_ref().and_then(|l| l.href().ok()).unwrap_or_default();
            let host = location
                .as_ref()
                .and_then(|l| l.host().ok())
                .unwrap_or_else(|| "localhost:3000".to_owned());
            let path = blog_wire::likes::with_article_query(&self.endpoints.live_url, article_id);
            let url = socket_url(&href, &host, &path);

            let (task, handle) = futures::future::abortable(listen(url, article_id.to_owned(), on_update));
            leptos::task::spawn_local(async move {
                let _ = task.await;
            });
            Subscription::new(move || handle.abort())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (article_id, on_update);
            Subscription::inert()
        }
    }
}

/// Read `LikeUpdate` frames for one article until the socket closes.
#[cfg(feature = "hydrate")]
async fn listen(url: String, article_id: String, on_update: Box<dyn Fn(u64)>) {
    use futures::StreamExt;
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;

    let mut ws = match WebSocket::open(&url) {
        Ok(ws) => ws,
        Err(e) => {
            leptos::logging::warn!("likes: live socket failed to open: {e}");
            return;
        }
    };

    while let Some(msg) = ws.next().await {
        match msg {
            Ok(Message::Text(text)) => match blog_wire::LikeUpdate::decode(&text) {
                Ok(update) if update.id == article_id => on_update(update.count),
                Ok(_) => {}
                Err(e) => leptos::logging::warn!("likes: bad live update: {e}"),
            },
            Ok(Message::Bytes(_)) => {}
            Err(e) => {
                leptos::logging::warn!("likes: live socket error: {e}");
                break;
            }
        }
    }
}
