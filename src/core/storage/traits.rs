//! Key-value backend trait definition.

use crate::error::StorageError;

/// Trait for durable key-value text storage
///
/// Values are opaque text. Callers own the encoding and must tolerate
/// whatever they read back.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
