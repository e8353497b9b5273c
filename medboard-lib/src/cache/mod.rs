//! Query result cache
//!
//! Holds decoded JSON results keyed by endpoint, each entry carrying the
//! tags its endpoint provides and an expiry. Mutations invalidate tags;
//! invalidation drops matching entries and wakes [`Subscription`]s so views
//! can refetch.

mod config;
mod query;
mod subscription;

pub use config::*;
pub use query::*;
pub use subscription::*;

use chrono::DateTime;
use chrono::Utc;

use crate::api::Tag;

/// A cached query result.
#[derive(Debug, Clone)]
pub struct CachedValue {
    /// The raw JSON body.
    pub data: serde_json::Value,
    /// Tags provided by the endpoint that produced the value.
    pub tags: Vec<Tag>,
    /// Highest page merged into this entry, for accumulating endpoints.
    pub page: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl CachedValue {
    /// Creates a value that expires `ttl` from now.
    pub fn with_ttl(data: serde_json::Value, tags: Vec<Tag>, ttl: std::time::Duration) -> Self {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::zero());
        Self {
            data,
            tags,
            page: None,
            created_at: now,
            expires_at,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Returns `true` if invalidating any of `tags` drops this entry.
    pub fn is_invalidated_by(&self, tags: &[Tag]) -> bool {
        tags.iter()
            .any(|tag| self.tags.iter().any(|provided| tag.invalidates(provided)))
    }
}
