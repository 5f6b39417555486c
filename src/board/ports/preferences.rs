//! Key-value port for locally persisted user preferences.

use std::sync::Arc;
use thiserror::Error;

/// Result type for preference store operations.
pub type PreferenceResult<T> = Result<T, PreferenceError>;

/// Synchronous string key-value store.
pub trait PreferenceStore: Send + Sync {
    /// Reads a value.
    ///
    /// Returns `None` when the key is not set.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError::Storage`] when the backing store fails.
    fn get(&self, key: &str) -> PreferenceResult<Option<String>>;

    /// Writes a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError::Storage`] when the backing store fails.
    fn set(&self, key: &str, value: &str) -> PreferenceResult<()>;

    /// Removes a value. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError::Storage`] when the backing store fails.
    fn remove(&self, key: &str) -> PreferenceResult<()>;
}

/// Errors returned by preference stores.
#[derive(Debug, Clone, Error)]
pub enum PreferenceError {
    /// A stored value could not be decoded.
    #[error("malformed preference '{key}': {reason}")]
    Malformed {
        /// Offending key.
        key: String,
        /// Decoder message.
        reason: String,
    },

    /// Storage-layer failure.
    #[error("preference storage error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl PreferenceError {
    /// Wraps a storage error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }
}
