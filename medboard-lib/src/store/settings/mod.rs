//! Typed persisted slots for store state

mod backend;
mod memory;
mod sqlite;

pub use backend::SettingsBackend;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;

/// Typed settings provider.
///
/// Wraps a [`SettingsBackend`] with bincode serialization.
#[derive(Clone)]
pub struct SettingsProvider {
    backend: Arc<dyn SettingsBackend>,
}

impl SettingsProvider {
    pub fn new(backend: impl SettingsBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// A provider over a fresh [`MemoryBackend`].
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Get a typed value for a key.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.backend.get_bytes(key).await? {
            Some(bytes) => Ok(Some(
                bincode::deserialize(&bytes).map_err(StoreError::Deserialization)?,
            )),
            None => Ok(None),
        }
    }

    /// Set a typed value for a key.
    pub async fn set<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let bytes = bincode::serialize(value).map_err(StoreError::Serialization)?;
        self.backend.set_bytes(key, bytes).await
    }

    pub async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.backend.delete(key).await
    }
}

impl std::fmt::Debug for SettingsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsProvider").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_db(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!(
            "medboard-{}-{}-{}.db",
            name,
            std::process::id(),
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ))
    }

    #[tokio::test]
    async fn test_typed_slot_and_delete() {
        let settings = SettingsProvider::in_memory();
        assert_eq!(settings.get::<u32>("auth.session").await.unwrap(), None);

        settings.set("auth.session", &vec!["a".to_string()]).await.unwrap();
        assert_eq!(
            settings.get::<Vec<String>>("auth.session").await.unwrap(),
            Some(vec!["a".to_string()])
        );

        settings.delete("auth.session").await.unwrap();
        settings.delete("auth.session").await.unwrap();
        assert_eq!(settings.get::<Vec<String>>("auth.session").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_wrong_type_is_deserialization_error() {
        let settings = SettingsProvider::in_memory();
        settings.set("k", &1u8).await.unwrap();
        let err = settings.get::<String>("k").await.unwrap_err();
        assert!(matches!(err, StoreError::Deserialization(_)));
    }

    #[tokio::test]
    async fn test_sqlite_slots_survive_reopen() {
        let path = temp_db("slots");

        let backend = SqliteBackend::open(&path).await.unwrap();
        assert_eq!(backend.get_bytes("auth.session").await.unwrap(), None);
        backend.set_bytes("auth.session", vec![1, 2, 3]).await.unwrap();
        assert_eq!(backend.get_bytes("auth.session").await.unwrap(), Some(vec![1, 2, 3]));
        backend.set_bytes("auth.session", vec![4]).await.unwrap();
        backend.close().await.unwrap();

        let backend = SqliteBackend::open(&path).await.unwrap();
        assert_eq!(backend.get_bytes("auth.session").await.unwrap(), Some(vec![4]));
        backend.delete("auth.session").await.unwrap();
        assert_eq!(backend.get_bytes("auth.session").await.unwrap(), None);
        backend.close().await.unwrap();

        let backend = SqliteBackend::open(&path).await.unwrap();
        assert_eq!(backend.get_bytes("auth.session").await.unwrap(), None);
        backend.close().await.unwrap();

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_sqlite_remembers_missing_slot() {
        let path = temp_db("miss");
        let reader = SqliteBackend::open(&path).await.unwrap();
        assert_eq!(reader.get_bytes("auth.session").await.unwrap(), None);

        // written behind the reader's back; the reader owns its view
        let writer = SqliteBackend::open(&path).await.unwrap();
        writer.set_bytes("auth.session", vec![9]).await.unwrap();
        writer.close().await.unwrap();

        assert_eq!(reader.get_bytes("auth.session").await.unwrap(), None);
        reader.close().await.unwrap();

        let _ = std::fs::remove_file(&path);
    }
}
