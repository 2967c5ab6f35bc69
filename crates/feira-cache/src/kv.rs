//! Key-value store trait with automatic serialization.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::{de::DeserializeOwned, Serialize};

use crate::CacheError;

/// Byte-level key-value storage backend.
///
/// Implementations persist whole values under string keys. Writes
/// replace the previous value in full; there are no partial updates,
/// which keeps a single `set` the transaction boundary for callers.
///
/// The trait is object-safe so stores can be injected as
/// `Box<dyn KvStore>`. Typed access lives in [`KvStoreExt`].
pub trait KvStore {
    /// Get the raw bytes stored under `key`, if any.
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Replace the value under `key` with `value`.
    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;

    /// Delete the value under `key`. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Check whether `key` is present.
    fn exists(&self, key: &str) -> Result<bool, CacheError>;
}

/// Typed access on top of any [`KvStore`], including trait objects.
///
/// Values are encoded as JSON.
pub trait KvStoreExt: KvStore {
    /// Get and deserialize a value.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<Cart> = store.get("cart:session123")?;
    /// ```
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.get_raw(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Serialize and store a value.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// store.set("cart:session123", &cart)?;
    /// ```
    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.set_raw(key, &bytes)
    }
}

impl<S: KvStore + ?Sized> KvStoreExt for S {}

/// In-memory [`KvStore`] backend.
///
/// Used by tests and as the session store when no durable backend is
/// configured.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    /// Check if the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KvStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| CacheError::StoreError("store lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| CacheError::StoreError("store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| CacheError::StoreError("store lock poisoned".to_string()))?;
        entries.remove(key);
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| CacheError::StoreError("store lock poisoned".to_string()))?;
        Ok(entries.contains_key(key))
    }
}

/// Helper to build storage keys with namespacing.
///
/// # Example
///
/// ```rust,ignore
/// let key = namespaced_key!("cart", session_id);
/// // Returns "cart:session123"
/// ```
#[macro_export]
macro_rules! namespaced_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}
