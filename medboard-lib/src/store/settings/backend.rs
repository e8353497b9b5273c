//! Slot storage trait

use async_trait::async_trait;

use crate::error::StoreError;

/// Byte slots behind a [`SettingsProvider`](super::SettingsProvider).
#[async_trait]
pub trait SettingsBackend: Send + Sync {
    /// Returns the slot's bytes, or `None` if it was never written.
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replaces the slot's bytes.
    async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

    /// Clears the slot. Clearing an empty slot is not an error.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}
