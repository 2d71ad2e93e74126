//! Typed, JSON-serialized access to durable browser storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `PersistentCache` is built at startup and handed to components through
//! Leptos context. It backs the anonymous visitor id, per-article like flags
//! and the dark mode preference.
//!
//! ERROR HANDLING
//! ==============
//! Reads never fail: missing keys, unavailable storage (SSR, native tests) and
//! undecodable JSON all yield the caller's initial value. Writes always land in
//! the in-memory copy first so the current page sees them immediately; durable
//! write failures are logged and otherwise ignored.

#[cfg(test)]
#[path = "cache_test.rs"]
mod cache_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Failure reported by a [`KeyValueStore`].
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No durable store exists in this execution context.
    #[error("durable storage is unavailable")]
    Unavailable,
    /// The store exists but rejected the operation (quota, privacy mode, ...).
    #[error("storage access failed: {0}")]
    Access(String),
}

/// Raw string key-value store with origin-scoped durability.
pub trait KeyValueStore: Send + Sync {
    /// Fetch the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the store cannot be reached.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `raw` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the store cannot be reached or refuses the write.
    fn set_item(&self, key: &str, raw: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`. Unavailable outside the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
impl BrowserStorage {
    fn local_storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or(StorageError::Unavailable)?
            .local_storage()
            .map_err(|e| StorageError::Access(format!("{e:?}")))?
            .ok_or(StorageError::Unavailable)
    }
}

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        #[cfg(feature = "hydrate")]
        {
            Self::local_storage()?
                .get_item(key)
                .map_err(|e| StorageError::Access(format!("{e:?}")))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            Err(StorageError::Unavailable)
        }
    }

    fn set_item(&self, key: &str, raw: &str) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            Self::local_storage()?
                .set_item(key, raw)
                .map_err(|e| StorageError::Access(format!("{e:?}")))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, raw);
            Err(StorageError::Unavailable)
        }
    }
}

/// In-process store. Durable for the lifetime of the value only.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw (already serialized) entry.
    #[must_use]
    pub fn with_raw(self, key: &str, raw: &str) -> Self {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), raw.to_owned());
        self
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, raw: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.insert(key.to_owned(), raw.to_owned());
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, raw: &str) -> Result<(), StorageError> {
        (**self).set_item(key, raw)
    }
}

/// Shared typed accessor over a [`KeyValueStore`] with an in-memory copy.
///
/// Cloning is cheap; clones share both the durable store and the memory copy.
#[derive(Clone)]
pub struct PersistentCache {
    inner: Arc<CacheInner>,
}

struct CacheInner {
    store: Box<dyn KeyValueStore>,
    memory: Mutex<HashMap<String, Value>>,
}

impl PersistentCache {
    #[must_use]
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self { inner: Arc::new(CacheInner { store: Box::new(store), memory: Mutex::new(HashMap::new()) }) }
    }

    /// Cache over `window.localStorage`.
    #[must_use]
    pub fn browser() -> Self {
        Self::new(BrowserStorage)
    }

    /// Read the value stored under `key`, or `initial` if there is none.
    pub fn read<T: DeserializeOwned>(&self, key: &str, initial: T) -> T {
        let value = match self.memory_get(key) {
            Some(value) => value,
            None => match self.durable_get(key) {
                Some(value) => {
                    self.memory_insert(key, value.clone());
                    value
                }
                None => return initial,
            },
        };

        match serde_json::from_value(value) {
            Ok(typed) => typed,
            Err(e) => {
                leptos::logging::warn!("cache: value for {key} has unexpected shape: {e}");
                initial
            }
        }
    }

    /// Store `value` under `key`.
    pub fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(e) => {
                leptos::logging::warn!("cache: failed to encode value for {key}: {e}");
                return;
            }
        };
        let raw = value.to_string();
        self.memory_insert(key, value);

        match self.inner.store.set_item(key, &raw) {
            Ok(()) | Err(StorageError::Unavailable) => {}
            Err(e) => leptos::logging::warn!("cache: durable write for {key} failed: {e}"),
        }
    }

    /// Replace the value under `key` with `update(current)` and return it.
    ///
    /// `current` is the stored value, or `initial` if there is none.
    pub fn write_with<T, F>(&self, key: &str, initial: T, update: F) -> T
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(T) -> T,
    {
        let next = update(self.read(key, initial));
        self.write(key, &next);
        next
    }

    fn memory_get(&self, key: &str) -> Option<Value> {
        let memory = self.inner.memory.lock().unwrap_or_else(PoisonError::into_inner);
        memory.get(key).cloned()
    }

    fn memory_insert(&self, key: &str, value: Value) {
        let mut memory = self.inner.memory.lock().unwrap_or_else(PoisonError::into_inner);
        memory.insert(key.to_owned(), value);
    }

    fn durable_get(&self, key: &str) -> Option<Value> {
        let raw = match self.inner.store.get_item(key) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) | Err(StorageError::Unavailable) => return None,
            Err(e) => {
                leptos::logging::warn!("cache: durable read for {key} failed: {e}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                leptos::logging::warn!("cache: stored value for {key} is not JSON: {e}");
                None
            }
        }
    }
}

impl std::fmt::Debug for PersistentCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys = self.inner.memory.lock().unwrap_or_else(PoisonError::into_inner).len();
        f.debug_struct("PersistentCache").field("cached_keys", &keys).finish_non_exhaustive()
    }
}
