//! `localStorage`/`sessionStorage`-backed client storage implementation.
//!
//! The browser `Storage` API is synchronous, so this adapter implements
//! [`platform_host::ClientStorage`] directly. Off-wasm it reads as empty and accepts writes.

use platform_host::{ClientStorage, StorageScope};

#[derive(Debug, Clone, Copy)]
/// Browser client storage bound to one `Storage` area.
pub struct WebClientStorage {
    scope: StorageScope,
}

impl WebClientStorage {
    /// Storage backed by `window.localStorage`.
    pub const fn durable() -> Self {
        Self {
            scope: StorageScope::Durable,
        }
    }

    /// Storage backed by `window.sessionStorage`.
    pub const fn session() -> Self {
        Self {
            scope: StorageScope::Session,
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn storage(self) -> Result<web_sys::Storage, String> {
        let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
        let storage = match self.scope {
            StorageScope::Durable => window.local_storage(),
            StorageScope::Session => window.session_storage(),
        };
        storage
            .ok()
            .flatten()
            .ok_or_else(|| format!("{} storage unavailable", self.scope.as_str()))
    }
}

impl ClientStorage for WebClientStorage {
    fn scope(&self) -> StorageScope {
        self.scope
    }

    fn load_raw(&self, key: &str) -> Result<Option<String>, String> {
        #[cfg(target_arch = "wasm32")]
        {
            self.storage()?
                .get_item(key)
                .map_err(|e| format!("storage get_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(None)
        }
    }

    fn save_raw(&self, key: &str, raw_json: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            self.storage()?
                .set_item(key, raw_json)
                .map_err(|e| format!("storage set_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, raw_json);
            Ok(())
        }
    }

    fn delete_raw(&self, key: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            self.storage()?
                .remove_item(key)
                .map_err(|e| format!("storage remove_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn non_wasm_storage_is_inert() {
        let store = WebClientStorage::session();
        assert_eq!(store.scope(), StorageScope::Session);
        store.save_raw("k", "true").expect("save");
        assert_eq!(store.load_raw("k").expect("load"), None);
        store.delete_raw("k").expect("delete");
        assert_eq!(WebClientStorage::durable().scope(), StorageScope::Durable);
    }
}
