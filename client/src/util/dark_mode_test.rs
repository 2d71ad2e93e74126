#![cfg(not(feature = "hydrate"))]

use super::*;
use crate::util::cache::MemoryStorage;

#[test]
fn read_preference_defaults_to_light_without_stored_choice() {
    let cache = PersistentCache::new(MemoryStorage::new());
    assert!(!read_preference(&cache));
}

#[test]
fn read_preference_uses_stored_choice() {
    let cache = PersistentCache::new(MemoryStorage::new().with_raw(STORAGE_KEY, "true"));
    assert!(read_preference(&cache));
}

#[test]
fn toggle_flips_boolean_value() {
    let cache = PersistentCache::new(MemoryStorage::new());
    assert!(toggle(&cache, false));
    assert!(!toggle(&cache, true));
}

#[test]
fn toggle_persists_new_preference() {
    let cache = PersistentCache::new(MemoryStorage::new());
    let next = toggle(&cache, read_preference(&cache));
    assert!(next);
    assert!(read_preference(&cache));
    toggle(&cache, next);
    assert!(!read_preference(&cache));
}

#[test]
fn apply_is_noop_but_callable() {
    apply(false);
    apply(true);
}
