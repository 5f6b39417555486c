//! In-memory preference store.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::ports::{PreferenceError, PreferenceResult, PreferenceStore};

/// Thread-safe in-memory preference store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPreferenceStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryPreferenceStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: &impl std::fmt::Display) -> PreferenceError {
    PreferenceError::storage(std::io::Error::other(err.to_string()))
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn get(&self, key: &str) -> PreferenceResult<Option<String>> {
        let values = self.values.read().map_err(|err| lock_error(&err))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PreferenceResult<()> {
        let mut values = self.values.write().map_err(|err| lock_error(&err))?;
        values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> PreferenceResult<()> {
        let mut values = self.values.write().map_err(|err| lock_error(&err))?;
        values.remove(key);
        Ok(())
    }
}
