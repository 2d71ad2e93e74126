//! REST API helpers for article content.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None` since these endpoints are only
//! fetched from the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Option` outputs instead of panics so a missing article or an
//! unreachable server renders a fallback instead of breaking hydration.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use blog_wire::{Article, ArticleSummary, TermCount};

#[cfg(any(test, feature = "hydrate"))]
const ARTICLES_ENDPOINT: &str = "/api/articles";

#[cfg(any(test, feature = "hydrate"))]
fn article_endpoint(slug: &str) -> String {
    let slug = slug.trim_matches('/');
    let slug = slug.strip_prefix("posts/").unwrap_or(slug);
    format!("{ARTICLES_ENDPOINT}/{slug}")
}

#[cfg(any(test, feature = "hydrate"))]
fn terms_endpoint(kind: TermKind) -> &'static str {
    match kind {
        TermKind::Tags => "/api/tags",
        TermKind::Categories => "/api/categories",
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn term_articles_endpoint(kind: TermKind, name: &str) -> String {
    format!("{}/{}", terms_endpoint(kind), encode_segment(name))
}

/// Percent-encode one path segment. `byte_serialize` escapes a literal `+`,
/// so any `+` left in its output stands for a space.
fn encode_segment(name: &str) -> String {
    url::form_urlencoded::byte_serialize(name.trim().as_bytes()).collect::<String>().replace('+', "%20")
}

/// Which taxonomy to list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TermKind {
    Tags,
    Categories,
}

impl TermKind {
    /// Route segment shared by the listing pages and the API.
    #[must_use]
    pub fn segment(self) -> &'static str {
        match self {
            Self::Tags => "tags",
            Self::Categories => "categories",
        }
    }

    #[must_use]
    pub fn heading(self) -> &'static str {
        match self {
            Self::Tags => "Tags",
            Self::Categories => "Categories",
        }
    }

    /// Page listing every term of this kind, e.g. `/tags`.
    #[must_use]
    pub fn index_path(self) -> String {
        format!("/{}", self.segment())
    }

    /// Page listing the articles under one term, e.g. `/tags/rust`.
    #[must_use]
    pub fn term_path(self, name: &str) -> String {
        format!("/{}/{}", self.segment(), encode_segment(name))
    }
}

#[cfg(feature = "hydrate")]
async fn get_json<T: serde::de::DeserializeOwned>(url: &str) -> Option<T> {
    let resp = gloo_net::http::Request::get(url).send().await.ok()?;
    if !resp.ok() {
        leptos::logging::warn!("api: {url} returned {}", resp.status());
        return None;
    }
    resp.json::<T>().await.ok()
}

/// Fetch every published article from `/api/articles`, oldest first.
pub async fn fetch_articles() -> Option<Vec<ArticleSummary>> {
    #[cfg(feature = "hydrate")]
    {
        get_json(ARTICLES_ENDPOINT).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Fetch one article by slug. Accepts either `my-post` or `/posts/my-post`.
pub async fn fetch_article(slug: &str) -> Option<Article> {
    #[cfg(feature = "hydrate")]
    {
        get_json(&article_endpoint(slug)).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = slug;
        None
    }
}

/// Fetch tag or category usage counts.
pub async fn fetch_terms(kind: TermKind) -> Option<Vec<TermCount>> {
    #[cfg(feature = "hydrate")]
    {
        get_json(terms_endpoint(kind)).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = kind;
        None
    }
}

/// Fetch the articles filed under one tag or category, oldest first.
pub async fn fetch_term_articles(kind: TermKind, name: &str) -> Option<Vec<ArticleSummary>> {
    #[cfg(feature = "hydrate")]
    {
        get_json(&term_articles_endpoint(kind, name)).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (kind, name);
        None
    }
}
