//! Social share links for article footers.

#[cfg(test)]
#[path = "share_test.rs"]
mod share_test;

use blog_wire::ArticleRef;

const TWEET_INTENT_URL: &str = "https://twitter.com/intent/tweet";

/// Absolute URL of an article given the site origin (`https://host`).
#[must_use]
pub fn absolute_url(origin: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_owned();
    }
    let origin = origin.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{origin}{path}")
    } else {
        format!("{origin}/{path}")
    }
}

/// Tweet intent link sharing `article`, optionally crediting `via`.
#[must_use]
pub fn tweet_url(origin: &str, article: &ArticleRef, via: Option<&str>) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    query.append_pair("text", &article.title);
    query.append_pair("url", &absolute_url(origin, &article.url));
    if let Some(via) = via.map(|v| v.trim_start_matches('@')).filter(|v| !v.is_empty()) {
        query.append_pair("via", via);
    }
    format!("{TWEET_INTENT_URL}?{}", query.finish())
}

/// Origin of the current page. Empty during server rendering.
pub fn page_origin() -> String {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        String::new()
    }
}
