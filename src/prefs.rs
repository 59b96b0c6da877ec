use std::rc::Rc;

use log::debug;

use crate::error::StorageError;

/// A fallible string key-value store.
pub trait KeyValueStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

/// Infallible view over a [`KeyValueStore`]: reads fall back, writes are
/// fire-and-forget.
pub struct PreferenceStore<S> {
    backend: S,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn get(&self, key: &str, fallback: &str) -> String {
        match self.backend.read(key) {
            Ok(Some(value)) => value,
            Ok(None) => fallback.to_string(),
            Err(err) => {
                debug!("reading {key} failed, using fallback: {err}");
                fallback.to_string()
            }
        }
    }

    pub fn set(&self, key: &str, value: &str) {
        if let Err(err) = self.backend.write(key, value) {
            debug!("writing {key} failed, ignoring: {err}");
        }
    }

    /// Anything other than the literal `"false"` reads as enabled when the
    /// default is `true`.
    pub fn get_flag(&self, key: &str, default: bool) -> bool {
        let fallback = if default { "true" } else { "false" };
        match self.get(key, fallback).as_str() {
            "false" => false,
            "true" => true,
            _ => default,
        }
    }

    pub fn set_flag(&self, key: &str, value: bool) {
        self.set(key, if value { "true" } else { "false" });
    }
}

#[cfg(test)]
pub mod testing {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::KeyValueStore;
    use crate::error::StorageError;

    #[derive(Default)]
    pub struct MemoryStorage {
        entries: RefCell<HashMap<String, String>>,
    }

    impl MemoryStorage {
        pub fn with_entries(entries: &[(&str, &str)]) -> Self {
            let map = entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            Self {
                entries: RefCell::new(map),
            }
        }

        pub fn value(&self, key: &str) -> Option<String> {
            self.entries.borrow().get(key).cloned()
        }
    }

    impl KeyValueStore for MemoryStorage {
        fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.entries.borrow().get(key).cloned())
        }

        fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.entries
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    /// Behaves like storage in a locked-down private window.
    pub struct FailingStorage;

    impl KeyValueStore for FailingStorage {
        fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }

        fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Js("QuotaExceededError".to_string()))
        }
    }
}
