//! SQLite persistence for store slots

use std::path::Path;
use std::path::PathBuf;

use async_sqlite::Client;
use async_sqlite::ClientBuilder;
use async_trait::async_trait;
use dashmap::DashMap;
use rusqlite::OptionalExtension;

use super::SettingsBackend;
use crate::error::StoreError;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS store_slots (
    slot TEXT PRIMARY KEY,
    payload BLOB NOT NULL,
    saved_at TEXT NOT NULL
)";

/// One row per persisted slot, such as the auth session.
///
/// The database is owned by a single store. Lookups are remembered, misses
/// included, so a signed-out start reads the file once and every later
/// read of the session is served from memory. Writes go to disk first.
pub struct SqliteBackend {
    client: Client,
    path: PathBuf,
    known: DashMap<String, Option<Vec<u8>>>,
}

impl SqliteBackend {
    /// Opens (or creates) the database at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let client = ClientBuilder::new().path(&path).open().await?;
        client.conn(|conn| conn.execute_batch(SCHEMA)).await?;
        log::debug!("opened settings database {}", path.display());

        Ok(Self {
            client,
            path,
            known: DashMap::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Waits for pending writes and closes the connection.
    pub async fn close(&self) -> Result<(), StoreError> {
        self.client.close().await?;
        Ok(())
    }
}

#[async_trait]
impl SettingsBackend for SqliteBackend {
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        if let Some(known) = self.known.get(key) {
            return Ok(known.clone());
        }

        let slot = key.to_string();
        let payload = self
            .client
            .conn(move |conn| {
                conn.query_row(
                    "SELECT payload FROM store_slots WHERE slot = ?1",
                    [&slot],
                    |row| row.get::<_, Vec<u8>>(0),
                )
                .optional()
            })
            .await?;

        self.known.insert(key.to_string(), payload.clone());
        Ok(payload)
    }

    async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        let slot = key.to_string();
        let payload = value.clone();
        let saved_at = chrono::Utc::now().to_rfc3339();

        self.client
            .conn(move |conn| {
                conn.execute(
                    "INSERT INTO store_slots (slot, payload, saved_at) VALUES (?1, ?2, ?3)
                     ON CONFLICT(slot) DO UPDATE
                     SET payload = excluded.payload, saved_at = excluded.saved_at",
                    rusqlite::params![slot, payload, saved_at],
                )
            })
            .await?;

        self.known.insert(key.to_string(), Some(value));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let slot = key.to_string();

        self.client
            .conn(move |conn| conn.execute("DELETE FROM store_slots WHERE slot = ?1", [&slot]))
            .await?;

        self.known.insert(key.to_string(), None);
        Ok(())
    }
}

impl std::fmt::Debug for SqliteBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteBackend")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
