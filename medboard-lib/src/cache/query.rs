//! In-memory query cache using DashMap

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tokio::sync::broadcast;

use super::CacheConfig;
use super::CachedValue;
use super::Subscription;
use crate::api::CacheClass;
use crate::api::Tag;

const EVENT_CAPACITY: usize = 64;

/// Concurrent cache of query results with tag invalidation.
///
/// # Example
///
/// ```
/// use medboard_lib::api::{CacheClass, Tag, TagKind};
/// use medboard_lib::cache::{CacheConfig, QueryCache};
///
/// let cache = QueryCache::new(CacheConfig::default());
/// cache.insert(
///     "GET patients/",
///     serde_json::json!({"count": 0, "results": []}),
///     vec![Tag::kind(TagKind::Patients)],
///     CacheClass::List,
/// );
///
/// assert_eq!(cache.invalidate(&[Tag::kind(TagKind::Patients)]), 1);
/// assert!(cache.get("GET patients/").is_none());
/// ```
pub struct QueryCache {
    config: CacheConfig,
    entries: DashMap<String, CachedValue>,
    in_flight: DashMap<String, Arc<Mutex<()>>>,
    events: broadcast::Sender<Arc<Vec<Tag>>>,
}

impl QueryCache {
    pub fn new(config: CacheConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            config,
            entries: DashMap::new(),
            in_flight: DashMap::new(),
            events,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Returns the number of entries (including expired ones).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a live entry. Expired entries are dropped on access.
    pub fn get(&self, key: &str) -> Option<CachedValue> {
        {
            let entry = self.entries.get(key)?;
            if !entry.is_expired() {
                return Some(entry.value().clone());
            }
        }
        self.evict_expired(key);
        None
    }

    /// Removes the entry under `key` only if it is still expired, so an
    /// entry stored since the caller looked is kept.
    fn evict_expired(&self, key: &str) -> bool {
        self.entries
            .remove_if(key, |_, value| value.is_expired())
            .is_some()
    }

    /// Stores a result, replacing any previous entry under `key`.
    ///
    /// Returns `None` without storing when the class has a zero TTL.
    pub fn insert(
        &self,
        key: &str,
        data: serde_json::Value,
        tags: Vec<Tag>,
        class: CacheClass,
    ) -> Option<CachedValue> {
        let ttl = self.config.ttl_for(class);
        if ttl.is_zero() {
            return None;
        }
        let value = CachedValue::with_ttl(data, tags, ttl);
        self.entries.insert(key.to_string(), value.clone());
        log::debug!("cached {}", key);
        Some(value)
    }

    /// Merges one page of a paginated result into the entry under `key`.
    ///
    /// Page 1 (or a missing entry) replaces the entry. Later pages append
    /// their `results` to the cached ones and take the envelope fields
    /// (`count`, `next`, ...) from the new page.
    ///
    /// Returns the merged JSON, which is also what was stored unless the
    /// class has a zero TTL.
    pub fn merge_page(
        &self,
        key: &str,
        data: serde_json::Value,
        tags: Vec<Tag>,
        class: CacheClass,
        page: u32,
    ) -> serde_json::Value {
        let merged = match self.get(key) {
            Some(existing) if page > 1 => append_results(existing.data, data),
            _ => data,
        };

        let ttl = self.config.ttl_for(class);
        if !ttl.is_zero() {
            let mut value = CachedValue::with_ttl(merged.clone(), tags, ttl);
            value.page = Some(page);
            self.entries.insert(key.to_string(), value);
            log::debug!("cached {} (page {})", key, page);
        }
        merged
    }

    /// Drops every entry carrying one of `tags` and notifies subscribers.
    ///
    /// Returns the number of entries removed.
    pub fn invalidate(&self, tags: &[Tag]) -> usize {
        if tags.is_empty() {
            return 0;
        }

        let mut removed = 0;
        self.entries.retain(|_, value| {
            if value.is_invalidated_by(tags) {
                removed += 1;
                false
            } else {
                true
            }
        });

        log::debug!(
            "invalidated [{}]: {} entries dropped",
            tags.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(", "),
            removed
        );

        // No receivers is fine.
        let _ = self.events.send(Arc::new(tags.to_vec()));
        removed
    }

    /// Removes one entry.
    pub fn remove(&self, key: &str) {
        self.entries.remove(key);
    }

    /// Removes every entry. Subscribers are not notified.
    pub fn clear(&self) {
        self.entries.clear();
        log::debug!("query cache cleared");
    }

    /// Removes expired entries, returning how many were dropped.
    pub fn gc(&self) -> usize {
        let mut removed = 0;
        self.entries.retain(|_, value| {
            if value.is_expired() {
                removed += 1;
                false
            } else {
                true
            }
        });
        removed
    }

    /// Subscribes to invalidations touching any of `tags`.
    pub fn subscribe(&self, tags: Vec<Tag>) -> Subscription {
        Subscription::new(tags, self.events.subscribe())
    }

    /// Returns the lock serializing fetches of `key`.
    pub(crate) fn flight_lock(&self, key: &str) -> Arc<Mutex<()>> {
        self.in_flight
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Forgets the fetch lock of `key` once no one else holds it.
    pub(crate) fn release_flight(&self, key: &str) {
        self.in_flight
            .remove_if(key, |_, lock| Arc::strong_count(lock) <= 1);
    }
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("config", &self.config)
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

fn append_results(old: serde_json::Value, new: serde_json::Value) -> serde_json::Value {
    let serde_json::Value::Object(mut merged) = new else {
        return new;
    };
    let old_results = match old {
        serde_json::Value::Object(mut old) => match old.remove("results") {
            Some(serde_json::Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };
    let new_results = match merged.remove("results") {
        Some(serde_json::Value::Array(items)) => items,
        _ => Vec::new(),
    };
    let mut results = old_results;
    results.extend(new_results);
    merged.insert("results".to_string(), serde_json::Value::Array(results));
    serde_json::Value::Object(merged)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::api::TagKind;

    fn cache() -> QueryCache {
        QueryCache::new(CacheConfig::default())
    }

    #[test]
    fn test_insert_and_get() {
        let cache = cache();
        cache.insert("k", json!([1, 2]), vec![], CacheClass::Detail);
        assert_eq!(cache.get("k").unwrap().data, json!([1, 2]));
        assert!(cache.get("other").is_none());
    }

    #[test]
    fn test_zero_ttl_stores_nothing() {
        let cache = QueryCache::new(CacheConfig::no_cache());
        assert!(cache.insert("k", json!(1), vec![], CacheClass::List).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_expired_entry_not_returned() {
        let cache = QueryCache::new(CacheConfig::default().with_stats_ttl(Duration::from_millis(1)));
        cache.insert("k", json!(1), vec![], CacheClass::Stats);
        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.get("k").is_none());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_eviction_keeps_entry_stored_after_expiry() {
        let cache = QueryCache::new(CacheConfig::default().with_stats_ttl(Duration::from_millis(1)));
        cache.insert("k", json!(1), vec![], CacheClass::Stats);
        std::thread::sleep(Duration::from_millis(5));

        // a fresh result lands between the expiry check and the removal
        cache.insert("k", json!(2), vec![], CacheClass::Detail);
        assert!(!cache.evict_expired("k"));
        assert_eq!(cache.get("k").unwrap().data, json!(2));

        cache.insert("k", json!(3), vec![], CacheClass::Stats);
        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.evict_expired("k"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_gc_drops_expired() {
        let cache = QueryCache::new(CacheConfig::default().with_stats_ttl(Duration::from_millis(1)));
        cache.insert("a", json!(1), vec![], CacheClass::Stats);
        cache.insert("b", json!(2), vec![], CacheClass::Detail);
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(cache.gc(), 1);
        assert!(cache.get("b").is_some());
    }

    #[test]
    fn test_invalidate_by_family_and_id() {
        let cache = cache();
        cache.insert(
            "room-1",
            json!(1),
            vec![Tag::id(TagKind::Messages, "1")],
            CacheClass::List,
        );
        cache.insert(
            "room-2",
            json!(2),
            vec![Tag::id(TagKind::Messages, "2")],
            CacheClass::List,
        );
        cache.insert("rooms", json!(3), vec![Tag::kind(TagKind::ChatRooms)], CacheClass::List);

        assert_eq!(cache.invalidate(&[Tag::id(TagKind::Messages, "1")]), 1);
        assert!(cache.get("room-2").is_some());

        assert_eq!(cache.invalidate(&[Tag::kind(TagKind::Messages)]), 1);
        assert!(cache.get("rooms").is_some());
    }

    #[test]
    fn test_merge_page_appends_results() {
        let cache = cache();
        let tags = vec![Tag::kind(TagKind::ChatRooms)];

        cache.merge_page(
            "rooms",
            json!({"count": 3, "next": "p2", "results": [1, 2]}),
            tags.clone(),
            CacheClass::List,
            1,
        );
        let merged = cache.merge_page(
            "rooms",
            json!({"count": 3, "next": null, "results": [3]}),
            tags.clone(),
            CacheClass::List,
            2,
        );

        assert_eq!(merged, json!({"count": 3, "next": null, "results": [1, 2, 3]}));
        let entry = cache.get("rooms").unwrap();
        assert_eq!(entry.page, Some(2));
        assert_eq!(entry.data["results"], json!([1, 2, 3]));
    }

    #[test]
    fn test_merge_first_page_replaces() {
        let cache = cache();
        cache.merge_page("m", json!({"results": [1, 2]}), vec![], CacheClass::List, 1);
        cache.merge_page("m", json!({"results": [3]}), vec![], CacheClass::List, 2);
        cache.merge_page("m", json!({"results": [9]}), vec![], CacheClass::List, 1);
        assert_eq!(cache.get("m").unwrap().data["results"], json!([9]));
    }

    #[test]
    fn test_flight_lock_shared_per_key() {
        let cache = cache();
        let a = cache.flight_lock("k");
        let b = cache.flight_lock("k");
        assert!(Arc::ptr_eq(&a, &b));
        drop(a);
        drop(b);
        cache.release_flight("k");
        let c = cache.flight_lock("k");
        assert_eq!(Arc::strong_count(&c), 2);
    }
}
