//! Cache configuration

use std::time::Duration;

use crate::api::CacheClass;

/// TTLs for cached query results, per [`CacheClass`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use medboard_lib::cache::CacheConfig;
///
/// let config = CacheConfig::default()
///     .with_stats_ttl(Duration::from_secs(30))
///     .with_list_ttl(Duration::from_secs(120));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// TTL for paged list results.
    ///
    /// Default: 5 minutes
    pub list_ttl: Duration,

    /// TTL for single entity lookups.
    ///
    /// Default: 5 minutes
    pub detail_ttl: Duration,

    /// TTL for dashboard counters.
    ///
    /// Default: 1 minute
    pub stats_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            list_ttl: Duration::from_secs(300),
            detail_ttl: Duration::from_secs(300),
            stats_ttl: Duration::from_secs(60),
        }
    }
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list_ttl(mut self, ttl: Duration) -> Self {
        self.list_ttl = ttl;
        self
    }

    pub fn with_detail_ttl(mut self, ttl: Duration) -> Self {
        self.detail_ttl = ttl;
        self
    }

    pub fn with_stats_ttl(mut self, ttl: Duration) -> Self {
        self.stats_ttl = ttl;
        self
    }

    /// A config that never stores anything.
    pub fn no_cache() -> Self {
        Self {
            list_ttl: Duration::ZERO,
            detail_ttl: Duration::ZERO,
            stats_ttl: Duration::ZERO,
        }
    }

    /// Returns the TTL for a class of result.
    pub fn ttl_for(&self, class: CacheClass) -> Duration {
        match class {
            CacheClass::List => self.list_ttl,
            CacheClass::Detail => self.detail_ttl,
            CacheClass::Stats => self.stats_ttl,
        }
    }
}
