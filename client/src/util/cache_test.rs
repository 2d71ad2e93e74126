use super::*;

use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Draft {
    title: String,
    words: u32,
}

/// Store that refuses every operation, like a browser in strict privacy mode.
struct FailingStorage;

impl KeyValueStore for FailingStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Access("denied".into()))
    }

    fn set_item(&self, _key: &str, _raw: &str) -> Result<(), StorageError> {
        Err(StorageError::Access("quota exceeded".into()))
    }
}

fn memory_cache() -> (PersistentCache, Arc<MemoryStorage>) {
    let store = Arc::new(MemoryStorage::new());
    (PersistentCache::new(Arc::clone(&store)), store)
}

// =============================================================
// read
// =============================================================

#[test]
fn read_unwritten_key_returns_initial() {
    let (cache, _) = memory_cache();
    assert!(!cache.read("never-written", false));
    assert_eq!(cache.read("also-never", 42_u32), 42);
    assert_eq!(cache.read("nothing", String::from("fallback")), "fallback");
}

#[test]
fn read_decodes_seeded_durable_value() {
    let store = MemoryStorage::new().with_raw("draft", r#"{"title":"hi","words":3}"#);
    let cache = PersistentCache::new(store);
    let draft = cache.read("draft", Draft { title: String::new(), words: 0 });
    assert_eq!(draft, Draft { title: "hi".into(), words: 3 });
}

#[test]
fn read_malformed_json_returns_initial() {
    let cache = PersistentCache::new(MemoryStorage::new().with_raw("flag", "{not json"));
    assert!(cache.read("flag", true));
}

#[test]
fn read_wrong_shape_returns_initial() {
    let cache = PersistentCache::new(MemoryStorage::new().with_raw("flag", r#""yes""#));
    assert!(!cache.read("flag", false));
}

#[test]
fn read_empty_raw_value_returns_initial() {
    let cache = PersistentCache::new(MemoryStorage::new().with_raw("id", ""));
    assert_eq!(cache.read("id", String::from("none")), "none");
}

#[test]
fn read_storage_failure_returns_initial() {
    let cache = PersistentCache::new(FailingStorage);
    assert_eq!(cache.read("anything", 7_i32), 7);
}

// =============================================================
// write
// =============================================================

#[test]
fn write_then_read_round_trips() {
    let (cache, _) = memory_cache();
    cache.write("liked", &true);
    assert!(cache.read("liked", false));

    let draft = Draft { title: "post".into(), words: 120 };
    cache.write("draft", &draft);
    assert_eq!(cache.read("draft", Draft { title: String::new(), words: 0 }), draft);
}

#[test]
fn write_persists_json_to_durable_store() {
    let (cache, store) = memory_cache();
    cache.write("visitor", "abc123");
    assert_eq!(store.get_item("visitor").expect("memory store"), Some(r#""abc123""#.to_owned()));
}

#[test]
fn write_survives_reload_through_durable_store() {
    let store = Arc::new(MemoryStorage::new());
    PersistentCache::new(Arc::clone(&store)).write("count", &5_u64);

    let reloaded = PersistentCache::new(store);
    assert_eq!(reloaded.read("count", 0_u64), 5);
}

#[test]
fn write_overwrites_previous_value() {
    let (cache, _) = memory_cache();
    cache.write("flag", &true);
    cache.write("flag", &false);
    assert!(!cache.read("flag", true));
}

#[test]
fn write_without_durable_store_updates_memory_copy() {
    let cache = PersistentCache::new(BrowserStorage);
    cache.write("dark-mode", &true);
    assert!(cache.read("dark-mode", false));
}

#[test]
fn write_with_failing_store_still_visible_in_memory() {
    let cache = PersistentCache::new(FailingStorage);
    cache.write("liked", &true);
    assert!(cache.read("liked", false));
}

#[test]
fn clones_share_the_memory_copy() {
    let cache = PersistentCache::new(BrowserStorage);
    let other = cache.clone();
    cache.write("shared", &"value");
    assert_eq!(other.read("shared", String::new()), "value");
}

// =============================================================
// write_with
// =============================================================

#[test]
fn write_with_starts_from_initial_when_missing() {
    let (cache, _) = memory_cache();
    let next = cache.write_with("visits", 10_u32, |n| n + 1);
    assert_eq!(next, 11);
    assert_eq!(cache.read("visits", 0_u32), 11);
}

#[test]
fn write_with_sees_previous_value() {
    let (cache, _) = memory_cache();
    cache.write("visits", &3_u32);
    cache.write_with("visits", 0_u32, |n| n + 1);
    cache.write_with("visits", 0_u32, |n| n + 1);
    assert_eq!(cache.read("visits", 0_u32), 5);
}
