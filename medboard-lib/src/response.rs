//! Query results with cache status

use chrono::DateTime;
use chrono::Utc;

/// The result of a store query, tagged with where the data came from.
///
/// # Example
///
/// ```ignore
/// let page = store.query(&Patients::list(&params)).await?;
///
/// if page.is_cached() {
///     log::debug!("served from cache, expires {:?}", page.expires_at());
/// }
///
/// let patients = page.into_inner();
/// ```
#[derive(Debug, Clone)]
pub struct Response<T> {
    data: T,
    /// Whether this response was served from the query cache.
    pub cache: CacheStatus,
}

impl<T> Response<T> {
    /// A response that did not touch the cache (mutations, zero TTL).
    pub fn new(data: T) -> Self {
        Self {
            data,
            cache: CacheStatus::None,
        }
    }

    /// A freshly fetched response that is now cached.
    pub fn cache_miss(data: T, cached_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            data,
            cache: CacheStatus::Miss {
                cached_at,
                expires_at,
            },
        }
    }

    /// A response served from the cache.
    pub fn cache_hit(data: T, cached_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            data,
            cache: CacheStatus::Hit {
                cached_at,
                expires_at,
            },
        }
    }

    /// Returns `true` if no request was made.
    pub fn is_cached(&self) -> bool {
        self.cache.is_hit()
    }

    /// Returns when the cached entry expires.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        match &self.cache {
            CacheStatus::None => None,
            CacheStatus::Miss { expires_at, .. } | CacheStatus::Hit { expires_at, .. } => {
                Some(*expires_at)
            }
        }
    }

    /// Returns when the cached entry was stored.
    pub fn cached_at(&self) -> Option<DateTime<Utc>> {
        match &self.cache {
            CacheStatus::None => None,
            CacheStatus::Miss { cached_at, .. } | CacheStatus::Hit { cached_at, .. } => {
                Some(*cached_at)
            }
        }
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn into_inner(self) -> T {
        self.data
    }

    /// Maps the payload, keeping the cache status.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Response<U> {
        Response {
            data: f(self.data),
            cache: self.cache,
        }
    }
}

/// Cache status of a [`Response`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// The cache was bypassed.
    None,
    /// Fetched from the backend and stored.
    Miss {
        cached_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    },
    /// Served from the cache.
    Hit {
        cached_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    },
}

impl CacheStatus {
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }

    pub fn is_miss(&self) -> bool {
        matches!(self, Self::Miss { .. })
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}
