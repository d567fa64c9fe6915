//! Synchronous client-side key/value storage contracts and adapters.
//!
//! Values are stored as raw JSON text per key, mirroring the browser `Storage` API. Typed access
//! goes through [`load_typed_with`] and [`save_typed_with`].

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};

/// Lifetime class of a client storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageScope {
    /// Survives browser restarts (`localStorage`).
    Durable,
    /// Cleared when the browsing session ends (`sessionStorage`).
    Session,
}

impl StorageScope {
    /// Returns a stable token for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Durable => "durable",
            Self::Session => "session",
        }
    }
}

/// Host service for small client-side values (JSON stored as text per key).
pub trait ClientStorage {
    /// Returns the lifetime class of this backend.
    fn scope(&self) -> StorageScope;

    /// Loads the raw JSON string stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage is unavailable.
    fn load_raw(&self, key: &str) -> Result<Option<String>, String>;

    /// Saves a raw JSON string under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage is unavailable or rejects the write.
    fn save_raw(&self, key: &str, raw_json: &str) -> Result<(), String>;

    /// Removes `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage is unavailable or rejects the delete.
    fn delete_raw(&self, key: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy)]
/// No-op storage for unsupported targets: reads are empty and writes succeed.
pub struct NoopClientStorage {
    scope: StorageScope,
}

impl NoopClientStorage {
    /// Creates a no-op backend reporting `scope`.
    pub const fn new(scope: StorageScope) -> Self {
        Self { scope }
    }
}

impl ClientStorage for NoopClientStorage {
    fn scope(&self) -> StorageScope {
        self.scope
    }

    fn load_raw(&self, _key: &str) -> Result<Option<String>, String> {
        Ok(None)
    }

    fn save_raw(&self, _key: &str, _raw_json: &str) -> Result<(), String> {
        Ok(())
    }

    fn delete_raw(&self, _key: &str) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Clone)]
/// In-memory storage keyed by string. Clones share the same map.
pub struct MemoryClientStorage {
    scope: StorageScope,
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryClientStorage {
    /// Creates an empty in-memory backend reporting `scope`.
    pub fn new(scope: StorageScope) -> Self {
        Self {
            scope,
            inner: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns whether no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl ClientStorage for MemoryClientStorage {
    fn scope(&self) -> StorageScope {
        self.scope
    }

    fn load_raw(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.inner.borrow().get(key).cloned())
    }

    fn save_raw(&self, key: &str, raw_json: &str) -> Result<(), String> {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), raw_json.to_string());
        Ok(())
    }

    fn delete_raw(&self, key: &str) -> Result<(), String> {
        self.inner.borrow_mut().remove(key);
        Ok(())
    }
}

/// Loads and deserializes a typed value through a [`ClientStorage`] implementation.
///
/// # Errors
///
/// Returns an error when the store or JSON deserialization fails.
pub fn load_typed_with<S: ClientStorage + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, String> {
    let Some(raw) = store.load_raw(key)? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw).map_err(|e| e.to_string())?;
    Ok(Some(value))
}

/// Serializes and saves a typed value through a [`ClientStorage`] implementation.
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub fn save_typed_with<S: ClientStorage + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let raw = serde_json::to_string(value).map_err(|e| e.to_string())?;
    store.save_raw(key, &raw)
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    enum Choice {
        Adult,
        Minor,
    }

    #[test]
    fn memory_storage_round_trip_and_delete() {
        let store = MemoryClientStorage::new(StorageScope::Durable);
        let store_obj: &dyn ClientStorage = &store;

        store_obj.save_raw("site.key", "{\"k\":1}").expect("save");
        assert_eq!(
            store_obj.load_raw("site.key").expect("load"),
            Some("{\"k\":1}".to_string())
        );
        store_obj.delete_raw("site.key").expect("delete");
        assert_eq!(store_obj.load_raw("site.key").expect("load"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn memory_storage_clones_share_state() {
        let store = MemoryClientStorage::new(StorageScope::Session);
        let clone = store.clone();
        save_typed_with(&store, "flag", &true).expect("save");
        assert_eq!(
            load_typed_with::<_, bool>(&clone, "flag").expect("load"),
            Some(true)
        );
        assert_eq!(clone.scope(), StorageScope::Session);
    }

    #[test]
    fn typed_helpers_surface_decode_errors() {
        let store = MemoryClientStorage::new(StorageScope::Durable);
        save_typed_with(&store, "choice", &Choice::Minor).expect("save typed");
        assert_eq!(
            load_typed_with::<_, Choice>(&store, "choice").expect("load typed"),
            Some(Choice::Minor)
        );

        store.save_raw("choice", "not json").expect("save raw");
        assert!(load_typed_with::<_, Choice>(&store, "choice").is_err());
        assert_ne!(Choice::Adult, Choice::Minor);
    }

    #[test]
    fn noop_storage_is_empty_and_successful() {
        let store = NoopClientStorage::new(StorageScope::Durable);
        assert_eq!(store.load_raw("k").expect("load"), None);
        store.save_raw("k", "{}").expect("save");
        store.delete_raw("k").expect("delete");
        assert_eq!(store.scope().as_str(), "durable");
    }
}
