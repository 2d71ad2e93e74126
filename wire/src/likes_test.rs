use super::*;

#[test]
fn like_flag_key_joins_visitor_and_article() {
    assert_eq!(like_flag_key("v1", "hello-world"), "v1::hello-world");
}

#[test]
fn count_for_missing_article_is_absent() {
    let mut counts = LikeCounts::new();
    counts.insert("a".into(), 3);
    assert_eq!(count_for(&counts, "a"), Some(3));
    assert_eq!(count_for(&counts, "b"), None);
}

#[test]
fn count_for_zero_is_present() {
    let mut counts = LikeCounts::new();
    counts.insert("a".into(), 0);
    assert_eq!(count_for(&counts, "a"), Some(0));
}

#[test]
fn like_counts_decode_from_backend_map() {
    let counts: LikeCounts = serde_json::from_str(r#"{"intro-to-rust":12,"gatsby":4}"#).expect("counts");
    assert_eq!(count_for(&counts, "intro-to-rust"), Some(12));
    assert_eq!(count_for(&counts, "gatsby"), Some(4));
}

#[test]
fn like_update_encodes_flat_json() {
    let text = LikeUpdate::new("post", 7).encode().expect("encode");
    let value: serde_json::Value = serde_json::from_str(&text).expect("json");
    assert_eq!(value, serde_json::json!({"id": "post", "count": 7}));
}

#[test]
fn like_update_decode_rejects_blank_id() {
    let err = LikeUpdate::decode(r#"{"id":"  ","count":1}"#).unwrap_err();
    assert!(matches!(err, WireError::MissingId));
}

#[test]
fn like_update_decode_rejects_negative_count() {
    let err = LikeUpdate::decode(r#"{"id":"a","count":-1}"#).unwrap_err();
    assert!(matches!(err, WireError::Decode(_)));
}

#[test]
fn register_query_trims_and_rejects_blank() {
    let query = RegisterQuery { id: Some("  post-1 ".into()) };
    assert_eq!(query.article_id(), Some("post-1"));
    assert_eq!(RegisterQuery { id: Some(String::new()) }.article_id(), None);
    assert_eq!(RegisterQuery::default().article_id(), None);
}

#[test]
fn with_article_query_encodes_id() {
    assert_eq!(with_article_query("/api/likes/register", "a b&c"), "/api/likes/register?id=a+b%26c");
}

#[test]
fn with_article_query_appends_to_existing_query() {
    assert_eq!(with_article_query("/x?v=1", "id"), "/x?v=1&id=id");
}
