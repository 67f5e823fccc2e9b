//! Typed repositories over a [`KeyValueStore`].

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;

use folio_types::error::FolioError;

use crate::store::KeyValueStore;

/// Typed access to one stored value.
///
/// `load` never fails: absent or unparseable data yields a default.
/// `save` never fails either; write errors are logged and dropped, the
/// in-memory state stays authoritative for the session.
pub trait Repository<T> {
    fn load(&self) -> T;

    fn save(&mut self, value: &T);
}

/// A value stored as JSON text under a fixed key.
pub struct JsonRepository<'s, T> {
    store: &'s mut dyn KeyValueStore,
    key: &'static str,
    fallback: fn() -> T,
    _marker: PhantomData<T>,
}

impl<'s, T> JsonRepository<'s, T> {
    pub fn new(store: &'s mut dyn KeyValueStore, key: &'static str, fallback: fn() -> T) -> Self {
        Self {
            store,
            key,
            fallback,
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Whether anything is stored under the key.
    pub fn is_stored(&self) -> bool {
        matches!(self.store.get(self.key), Ok(Some(_)))
    }
}

impl<T: Serialize + DeserializeOwned> Repository<T> for JsonRepository<'_, T> {
    fn load(&self) -> T {
        match self.store.get(self.key) {
            Ok(Some(text)) => serde_json::from_str(&text).unwrap_or_else(|e| {
                log::warn!("Stored '{}' is malformed ({e}), using defaults", self.key);
                (self.fallback)()
            }),
            Ok(None) => (self.fallback)(),
            Err(e) => {
                log::warn!("Reading '{}' failed ({e}), using defaults", self.key);
                (self.fallback)()
            },
        }
    }

    fn save(&mut self, value: &T) {
        let result = serde_json::to_string(value)
            .map_err(FolioError::from)
            .and_then(|text| self.store.set(self.key, &text));
        match result {
            Ok(()) => log::debug!("Saved '{}'", self.key),
            Err(e) => log::warn!("Saving '{}' failed: {e}", self.key),
        }
    }
}
