use super::*;

#[test]
fn article_endpoint_uses_bare_slug() {
    assert_eq!(article_endpoint("rust-wasm"), "/api/articles/rust-wasm");
}

#[test]
fn article_endpoint_strips_posts_prefix() {
    assert_eq!(article_endpoint("/posts/rust-wasm"), "/api/articles/rust-wasm");
    assert_eq!(article_endpoint("/posts/rust-wasm/"), "/api/articles/rust-wasm");
}

#[test]
fn terms_endpoint_per_kind() {
    assert_eq!(terms_endpoint(TermKind::Tags), "/api/tags");
    assert_eq!(terms_endpoint(TermKind::Categories), "/api/categories");
}

#[test]
fn term_articles_endpoint_encodes_name() {
    assert_eq!(term_articles_endpoint(TermKind::Tags, "rust"), "/api/tags/rust");
    assert_eq!(term_articles_endpoint(TermKind::Categories, "web dev"), "/api/categories/web%20dev");
    assert_eq!(term_articles_endpoint(TermKind::Tags, "c++"), "/api/tags/c%2B%2B");
}

#[test]
fn term_pages_share_the_api_segment() {
    assert_eq!(TermKind::Tags.index_path(), "/tags");
    assert_eq!(TermKind::Categories.index_path(), "/categories");
    assert_eq!(TermKind::Tags.term_path("rust"), "/tags/rust");
    assert_eq!(TermKind::Categories.term_path(" a/b "), "/categories/a%2Fb");
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn fetches_resolve_to_none_off_browser() {
    use futures::executor::block_on;

    assert_eq!(block_on(fetch_articles()), None);
    assert_eq!(block_on(fetch_article("a")), None);
    assert_eq!(block_on(fetch_terms(TermKind::Tags)), None);
    assert_eq!(block_on(fetch_term_articles(TermKind::Tags, "rust")), None);
}
