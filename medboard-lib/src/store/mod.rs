//! Application store
//!
//! [`AppStore`] is the single shared owner of the API client, the query
//! cache and the persisted auth slice. It is cheap to clone and meant to be
//! handed to every page.
//!
//! Reads go through [`query`](AppStore::query), which serves fresh cache
//! entries, de-duplicates concurrent identical fetches and merges paged
//! endpoints. Writes go through [`mutate`](AppStore::mutate), which
//! invalidates the endpoint's tags once the backend accepted the change.

pub mod settings;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::MedboardClient;
use crate::Response;
use crate::api::Endpoint;
use crate::api::Tag;
use crate::api::decode;
use crate::auth::AuthSlice;
use crate::auth::SessionHandle;
use crate::cache::CacheConfig;
use crate::cache::QueryCache;
use crate::cache::Subscription;
use crate::error::Error;
use crate::error::StoreError;
use crate::retry::RetryConfig;
use settings::SettingsProvider;
use settings::SqliteBackend;

/// Settings key of the persisted auth slice.
pub const AUTH_KEY: &str = "auth.session";

/// Where persisted settings live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsLocation {
    /// A SQLite database file.
    Sqlite(PathBuf),
    /// Process memory; nothing survives a restart.
    Memory,
}

/// Store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub api_url: String,
    pub settings: SettingsLocation,
    pub cache: CacheConfig,
    pub retry: RetryConfig,
    pub timeout: Option<Duration>,
}

impl StoreConfig {
    /// In-memory settings, default cache and retry policy.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            settings: SettingsLocation::Memory,
            cache: CacheConfig::default(),
            retry: RetryConfig::default(),
            timeout: None,
        }
    }

    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings = SettingsLocation::Sqlite(path.into());
        self
    }

    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

struct StoreInner {
    client: MedboardClient,
    cache: QueryCache,
    session: SessionHandle,
    settings: SettingsProvider,
}

/// Shared application state.
///
/// # Example
///
/// ```ignore
/// use medboard_lib::api::{ListParams, Patients};
/// use medboard_lib::store::{AppStore, StoreConfig};
///
/// let store = AppStore::open(StoreConfig::new("https://api.example.com/api/v1")).await?;
/// let page = store.query(&Patients::list(&ListParams::new().page(1))).await?;
/// println!("{} patients", page.data().count);
/// ```
#[derive(Clone)]
pub struct AppStore {
    inner: Arc<StoreInner>,
}

impl AppStore {
    /// Opens the settings backend named by `config` and rehydrates the auth
    /// slice from it.
    pub async fn open(config: StoreConfig) -> Result<Self, Error> {
        let settings = match &config.settings {
            SettingsLocation::Sqlite(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).map_err(|source| StoreError::Directory {
                        path: parent.to_path_buf(),
                        source,
                    })?;
                }
                SettingsProvider::new(SqliteBackend::open(path).await?)
            }
            SettingsLocation::Memory => SettingsProvider::in_memory(),
        };
        Self::with_settings(config, settings).await
    }

    /// Like [`open`](Self::open) but over an existing settings provider.
    pub async fn with_settings(config: StoreConfig, settings: SettingsProvider) -> Result<Self, Error> {
        let slice = match settings.get::<AuthSlice>(AUTH_KEY).await {
            Ok(slice) => slice.unwrap_or_default(),
            Err(StoreError::Deserialization(e)) => {
                log::warn!("discarding unreadable auth slice: {}", e);
                settings.delete(AUTH_KEY).await?;
                AuthSlice::default()
            }
            Err(e) => return Err(e.into()),
        };
        if slice.is_authenticated {
            log::info!("restored session for {}", describe(&slice));
        }

        let session = SessionHandle::new(slice);
        let builder = MedboardClient::builder()
            .url(config.api_url)
            .token_provider(session.clone())
            .retry(config.retry);
        let client = match config.timeout {
            Some(timeout) => builder.timeout(timeout).build(),
            None => builder.build(),
        };

        Ok(Self {
            inner: Arc::new(StoreInner {
                client,
                cache: QueryCache::new(config.cache),
                session,
                settings,
            }),
        })
    }

    pub fn client(&self) -> &MedboardClient {
        &self.inner.client
    }

    pub fn cache(&self) -> &QueryCache {
        &self.inner.cache
    }

    pub fn session(&self) -> &SessionHandle {
        &self.inner.session
    }

    pub fn settings(&self) -> &SettingsProvider {
        &self.inner.settings
    }

    /// Returns a copy of the current auth slice.
    pub fn auth(&self) -> AuthSlice {
        self.inner.session.snapshot()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Runs a read, serving it from the cache when a live entry exists.
    ///
    /// Non-GET endpoints are never cached and go through
    /// [`mutate`](Self::mutate).
    pub async fn query<T: DeserializeOwned>(&self, endpoint: &Endpoint<T>) -> Result<Response<T>, Error> {
        if !endpoint.is_query() {
            return self.mutate(endpoint).await.map(Response::new);
        }
        self.fetch(endpoint, false).await
    }

    /// Runs a read, bypassing any cached entry and replacing it.
    pub async fn refetch<T: DeserializeOwned>(&self, endpoint: &Endpoint<T>) -> Result<Response<T>, Error> {
        if !endpoint.is_query() {
            return self.mutate(endpoint).await.map(Response::new);
        }
        self.fetch(endpoint, true).await
    }

    /// Sends a write and invalidates the endpoint's tags on success.
    pub async fn mutate<T: DeserializeOwned>(&self, endpoint: &Endpoint<T>) -> Result<T, Error> {
        let data = self.inner.client.send(endpoint).await?;
        let tags = endpoint.invalidated_tags();
        if !tags.is_empty() {
            self.inner.cache.invalidate(tags);
        }
        Ok(data)
    }

    /// Drops cached entries carrying any of `tags` and notifies subscribers.
    pub fn invalidate(&self, tags: &[Tag]) -> usize {
        self.inner.cache.invalidate(tags)
    }

    /// Subscribes to invalidations of `tags`.
    pub fn subscribe(&self, tags: Vec<Tag>) -> Subscription {
        self.inner.cache.subscribe(tags)
    }

    /// Subscribes to invalidations of the tags `endpoint` provides.
    pub fn watch<T>(&self, endpoint: &Endpoint<T>) -> Subscription {
        self.subscribe(endpoint.provided_tags().to_vec())
    }

    async fn fetch<T: DeserializeOwned>(&self, endpoint: &Endpoint<T>, force: bool) -> Result<Response<T>, Error> {
        let key = endpoint.cache_key();
        if !force {
            if let Some(hit) = self.cached(endpoint, &key) {
                return hit;
            }
        }

        let lock = self.inner.cache.flight_lock(&key);
        let result = {
            let _guard = lock.lock().await;
            // an identical query may have filled the entry while we waited
            match self.cached(endpoint, &key).filter(|_| !force) {
                Some(hit) => hit,
                None => self.fetch_and_store(endpoint, &key).await,
            }
        };
        drop(lock);
        self.inner.cache.release_flight(&key);
        result
    }

    fn cached<T: DeserializeOwned>(&self, endpoint: &Endpoint<T>, key: &str) -> Option<Result<Response<T>, Error>> {
        let entry = self.inner.cache.get(key)?;
        if let Some(merge) = endpoint.merge {
            if entry.page != Some(merge.page) {
                return None;
            }
        }
        log::debug!("cache hit {}", key);
        Some(decode(entry.data).map(|data| Response::cache_hit(data, entry.created_at, entry.expires_at)))
    }

    async fn fetch_and_store<T: DeserializeOwned>(&self, endpoint: &Endpoint<T>, key: &str) -> Result<Response<T>, Error> {
        let value = self.inner.client.send_json(endpoint).await?;
        let tags = endpoint.provided_tags().to_vec();
        let cache = &self.inner.cache;

        if let Some(merge) = endpoint.merge {
            let merged = cache.merge_page(key, value, tags, endpoint.cache_class, merge.page);
            let data = decode(merged)?;
            return Ok(match cache.get(key) {
                Some(entry) => Response::cache_miss(data, entry.created_at, entry.expires_at),
                None => Response::new(data),
            });
        }

        let data = decode(value.clone())?;
        Ok(match cache.insert(key, value, tags, endpoint.cache_class) {
            Some(entry) => Response::cache_miss(data, entry.created_at, entry.expires_at),
            None => Response::new(data),
        })
    }

    // =========================================================================
    // Session lifecycle
    // =========================================================================

    /// Installs and persists a new session. Cached data from a previous
    /// session is dropped.
    pub async fn login(&self, slice: AuthSlice) -> Result<(), Error> {
        self.inner.settings.set(AUTH_KEY, &slice).await?;
        self.inner.cache.clear();
        log::info!("signed in as {}", describe(&slice));
        self.inner.session.replace(slice);
        Ok(())
    }

    /// Clears the cache, forgets the persisted session and drops the token.
    pub async fn logout(&self) -> Result<(), Error> {
        self.inner.cache.clear();
        self.inner.settings.delete(AUTH_KEY).await?;
        self.inner.session.clear();
        log::info!("signed out");
        Ok(())
    }

    /// Writes the current auth slice back and drops cached queries.
    pub async fn shutdown(self) -> Result<(), Error> {
        let slice = self.inner.session.snapshot();
        if slice.is_authenticated {
            self.inner.settings.set(AUTH_KEY, &slice).await?;
        } else {
            self.inner.settings.delete(AUTH_KEY).await?;
        }
        self.inner.cache.clear();
        log::debug!("store shut down");
        Ok(())
    }
}

impl std::fmt::Debug for AppStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppStore")
            .field("client", &self.inner.client)
            .field("cache", &self.inner.cache)
            .field("authenticated", &self.inner.session.is_authenticated())
            .finish()
    }
}

fn describe(slice: &AuthSlice) -> String {
    match &slice.user {
        Some(user) => format!("{} <{}>", user.name, user.email),
        None => "token user".to_string(),
    }
}
