//! Key/value store seam for operator-set messages (welcome, broadcast).
//!
//! Store unavailability is never fatal: the facade logs the failure and
//! falls back to an in-memory, unsaved value.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Atomically replace the value, returning the previous one.
    fn get_and_set(&self, key: &str, value: &str) -> Result<Option<String>, StoreError>;

    fn set_expiry(&self, key: &str, seconds: u64) -> Result<(), StoreError>;
}
