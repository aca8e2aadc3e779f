//! Durable token persistence.
//!
//! DESIGN
//! ======
//! `SessionStore` owns the key layout (`access`, `refresh`, `userType`) and
//! delegates raw string persistence to a `KeyValueStore`. The browser uses
//! `localStorage`; SSR and tests use the in-memory map. Values are opaque and
//! never validated here.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::net::types::{TokenPair, UserType};

pub const ACCESS_KEY: &str = "access";
pub const REFRESH_KEY: &str = "refresh";
pub const USER_TYPE_KEY: &str = "userType";

/// Origin-scoped string key-value medium.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Browser `localStorage`. A no-op outside the hydrated client.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                if storage.set_item(key, value).is_err() {
                    log::warn!("localStorage write failed for {key}");
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

/// Shared in-memory medium. Clones see the same entries.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().map(|m| m.is_empty()).unwrap_or(true)
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_owned(), value.to_owned());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

/// Tokens as read back from the medium; either may be missing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoredTokens {
    pub access: Option<String>,
    pub refresh: Option<String>,
}

/// Session persistence over a [`KeyValueStore`].
#[derive(Clone, Debug, Default)]
pub struct SessionStore<K> {
    medium: K,
}

impl<K: KeyValueStore> SessionStore<K> {
    pub fn new(medium: K) -> Self {
        Self { medium }
    }

    pub fn save(&self, tokens: &TokenPair) {
        self.medium.set(ACCESS_KEY, &tokens.access);
        self.medium.set(REFRESH_KEY, &tokens.refresh);
    }

    pub fn save_access(&self, access: &str) {
        self.medium.set(ACCESS_KEY, access);
    }

    pub fn set_user_type(&self, kind: UserType) {
        self.medium.set(USER_TYPE_KEY, kind.as_str());
    }

    pub fn user_type(&self) -> Option<UserType> {
        self.medium.get(USER_TYPE_KEY).as_deref().and_then(UserType::parse)
    }

    /// Both tokens; empty strings read as absent.
    pub fn read(&self) -> StoredTokens {
        StoredTokens {
            access: self.medium.get(ACCESS_KEY).filter(|v| !v.is_empty()),
            refresh: self.medium.get(REFRESH_KEY).filter(|v| !v.is_empty()),
        }
    }

    pub fn clear(&self) {
        self.medium.remove(ACCESS_KEY);
        self.medium.remove(REFRESH_KEY);
        self.medium.remove(USER_TYPE_KEY);
    }

    pub fn medium(&self) -> &K {
        &self.medium
    }
}
