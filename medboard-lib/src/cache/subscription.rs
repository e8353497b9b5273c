//! Invalidation subscriptions

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::broadcast::error::TryRecvError;

use crate::api::Tag;

/// A handle that fires when the cache invalidates tags it watches.
///
/// A subscription on a family tag (`Messages`) fires for any id of that
/// family; a subscription on an id tag (`Messages:7`) fires for that id and
/// for family-wide invalidations.
pub struct Subscription {
    tags: Vec<Tag>,
    rx: broadcast::Receiver<Arc<Vec<Tag>>>,
}

impl Subscription {
    pub(crate) fn new(tags: Vec<Tag>, rx: broadcast::Receiver<Arc<Vec<Tag>>>) -> Self {
        Self { tags, rx }
    }

    /// The watched tags.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Waits for the next invalidation touching the watched tags.
    ///
    /// Returns the invalidated tags, or `None` once the cache is gone. If
    /// this subscriber fell behind, the watched tags are returned so the
    /// caller refetches.
    pub async fn changed(&mut self) -> Option<Vec<Tag>> {
        loop {
            match self.rx.recv().await {
                Ok(tags) => {
                    if self.watches(&tags) {
                        return Some(tags.to_vec());
                    }
                }
                Err(RecvError::Lagged(_)) => return Some(self.tags.clone()),
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Non-blocking variant of [`changed`](Self::changed).
    pub fn try_changed(&mut self) -> Option<Vec<Tag>> {
        loop {
            match self.rx.try_recv() {
                Ok(tags) => {
                    if self.watches(&tags) {
                        return Some(tags.to_vec());
                    }
                }
                Err(TryRecvError::Lagged(_)) => return Some(self.tags.clone()),
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }

    fn watches(&self, invalidated: &[Tag]) -> bool {
        invalidated.iter().any(|tag| {
            self.tags
                .iter()
                .any(|watched| tag.invalidates(watched) || watched.invalidates(tag))
        })
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("tags", &self.tags).finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::api::Tag;
    use crate::api::TagKind;
    use crate::cache::CacheConfig;
    use crate::cache::QueryCache;

    #[test]
    fn test_fires_only_for_watched_tags() {
        let cache = QueryCache::new(CacheConfig::default());
        let mut sub = cache.subscribe(vec![Tag::kind(TagKind::Patients)]);

        cache.invalidate(&[Tag::kind(TagKind::Doctors)]);
        assert_eq!(sub.try_changed(), None);

        cache.invalidate(&[Tag::kind(TagKind::Patients)]);
        assert_eq!(sub.try_changed(), Some(vec![Tag::kind(TagKind::Patients)]));
        assert_eq!(sub.try_changed(), None);
    }

    #[test]
    fn test_id_subscription_sees_family_invalidation() {
        let cache = QueryCache::new(CacheConfig::default());
        let mut sub = cache.subscribe(vec![Tag::id(TagKind::Messages, "7")]);

        cache.invalidate(&[Tag::id(TagKind::Messages, "8")]);
        assert_eq!(sub.try_changed(), None);

        cache.invalidate(&[Tag::kind(TagKind::Messages)]);
        assert!(sub.try_changed().is_some());
    }

    #[tokio::test]
    async fn test_changed_wakes_on_invalidation() {
        let cache = std::sync::Arc::new(QueryCache::new(CacheConfig::default()));
        let mut sub = cache.subscribe(vec![Tag::kind(TagKind::Appointments)]);

        let writer = cache.clone();
        tokio::spawn(async move {
            writer.invalidate(&[Tag::kind(TagKind::Appointments)]);
        });

        let tags = sub.changed().await;
        assert_eq!(tags, Some(vec![Tag::kind(TagKind::Appointments)]));
    }
}
