//! Typed endpoint descriptors and cache tags
//!
//! Every API call is described by an [`Endpoint<T>`] before it is sent: the
//! HTTP method, path and query, an optional JSON body, the cache tags it
//! provides (queries) or invalidates (mutations), and the response type `T`.
//! Descriptors are plain values, so they can be built, inspected and tested
//! without a network.

use std::fmt;
use std::marker::PhantomData;

use reqwest::Method;

// =============================================================================
// Tags
// =============================================================================

/// The resource families used for cache invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TagKind {
    Patients,
    Doctors,
    Hospitals,
    Appointments,
    DoctorReviews,
    HospitalReviews,
    Kyc,
    PatientStats,
    DoctorStats,
    HospitalStats,
    AppointmentStats,
    Dashboard,
    Specialties,
    ChatRooms,
    Messages,
    CalendarEvents,
    MeetDetails,
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A cache tag: a resource family, optionally narrowed to one entity id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag {
    pub kind: TagKind,
    pub id: Option<String>,
}

impl Tag {
    /// A tag covering the whole resource family.
    pub fn kind(kind: TagKind) -> Self {
        Self { kind, id: None }
    }

    /// A tag for a single entity of the family.
    pub fn id(kind: TagKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: Some(id.into()),
        }
    }

    /// Returns `true` if invalidating `self` must drop an entry that
    /// provided `provided`.
    ///
    /// A family tag invalidates every entry of that family; an id tag only
    /// invalidates entries that provided the same id.
    pub fn invalidates(&self, provided: &Tag) -> bool {
        if self.kind != provided.kind {
            return false;
        }
        match &self.id {
            None => true,
            Some(id) => provided.id.as_deref() == Some(id.as_str()),
        }
    }
}

impl From<TagKind> for Tag {
    fn from(kind: TagKind) -> Self {
        Self::kind(kind)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{}:{}", self.kind, id),
            None => write!(f, "{}", self.kind),
        }
    }
}

// =============================================================================
// Endpoint
// =============================================================================

/// Which TTL bucket a cached result falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheClass {
    /// Paged list results.
    List,
    /// Single entity lookups.
    Detail,
    /// Dashboard aggregates and counters.
    Stats,
}

/// Merge rule for endpoints that accumulate pages into one cache entry.
///
/// Page 1 replaces the cached `results`; later pages append to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMerge {
    pub page: u32,
}

/// A typed description of one API call.
///
/// `T` is the decoded response type. Mutations that return no content use
/// `T = ()`.
pub struct Endpoint<T> {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: Option<serde_json::Value>,
    pub(crate) provides: Vec<Tag>,
    pub(crate) invalidates: Vec<Tag>,
    pub(crate) cache_class: CacheClass,
    pub(crate) cache_key: Option<String>,
    pub(crate) merge: Option<PageMerge>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Endpoint<T> {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            provides: Vec::new(),
            invalidates: Vec::new(),
            cache_class: CacheClass::Detail,
            cache_key: None,
            merge: None,
            _marker: PhantomData,
        }
    }

    /// A GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// A POST request with a JSON body.
    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self::new(Method::POST, path).body(body)
    }

    /// A PATCH request with a JSON body.
    pub fn patch(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self::new(Method::PATCH, path).body(body)
    }

    /// A DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    fn body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Appends a query parameter.
    pub fn param(mut self, name: &str, value: impl ToString) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    /// Appends a query parameter only when it is set and non-empty.
    pub fn param_opt<V: ToString>(self, name: &str, value: Option<V>) -> Self {
        match value.map(|v| v.to_string()) {
            Some(v) if !v.is_empty() => self.param(name, v),
            _ => self,
        }
    }

    /// Declares a tag this query provides.
    pub fn provides(mut self, tag: impl Into<Tag>) -> Self {
        self.provides.push(tag.into());
        self
    }

    /// Declares a tag this mutation invalidates.
    pub fn invalidates(mut self, tag: impl Into<Tag>) -> Self {
        self.invalidates.push(tag.into());
        self
    }

    /// Sets the TTL bucket.
    pub fn cache_class(mut self, class: CacheClass) -> Self {
        self.cache_class = class;
        self
    }

    /// Overrides the cache key, so differing arguments share one entry.
    pub fn cache_key_override(mut self, key: impl Into<String>) -> Self {
        self.cache_key = Some(key.into());
        self
    }

    /// Accumulates pages into one cache entry.
    pub fn merge_pages(mut self, page: u32) -> Self {
        self.merge = Some(PageMerge { page });
        self
    }

    /// Returns the HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the path relative to the base URL.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the query parameters in insertion order.
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Returns the JSON body, if any.
    pub fn json_body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// Returns the tags this endpoint provides.
    pub fn provided_tags(&self) -> &[Tag] {
        &self.provides
    }

    /// Returns the tags this endpoint invalidates.
    pub fn invalidated_tags(&self) -> &[Tag] {
        &self.invalidates
    }

    /// Returns `true` for read-only requests.
    pub fn is_query(&self) -> bool {
        self.method == Method::GET
    }

    /// Returns the path with its encoded query string, e.g.
    /// `patients/?page=2&search=ann`.
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path, query)
    }

    /// Returns the key under which the result is cached.
    pub fn cache_key(&self) -> String {
        match &self.cache_key {
            Some(key) => key.clone(),
            None => format!("{} {}", self.method, self.path_and_query()),
        }
    }
}

impl<T> Clone for Endpoint<T> {
    fn clone(&self) -> Self {
        Self {
            method: self.method.clone(),
            path: self.path.clone(),
            query: self.query.clone(),
            body: self.body.clone(),
            provides: self.provides.clone(),
            invalidates: self.invalidates.clone(),
            cache_class: self.cache_class,
            cache_key: self.cache_key.clone(),
            merge: self.merge,
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Endpoint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("method", &self.method)
            .field("path", &self.path_and_query())
            .field("provides", &self.provides)
            .field("invalidates", &self.invalidates)
            .finish()
    }
}

/// Encodes one path segment (an entity id).
pub(crate) fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_tag_invalidates_ids() {
        let family = Tag::kind(TagKind::Messages);
        assert!(family.invalidates(&Tag::id(TagKind::Messages, "room-1")));
        assert!(family.invalidates(&Tag::kind(TagKind::Messages)));
        assert!(!family.invalidates(&Tag::kind(TagKind::ChatRooms)));
    }

    #[test]
    fn test_id_tag_only_hits_same_id() {
        let tag = Tag::id(TagKind::Messages, "room-1");
        assert!(tag.invalidates(&Tag::id(TagKind::Messages, "room-1")));
        assert!(!tag.invalidates(&Tag::id(TagKind::Messages, "room-2")));
        assert!(!tag.invalidates(&Tag::kind(TagKind::Messages)));
    }

    #[test]
    fn test_optional_params_skipped() {
        let ep: Endpoint<()> = Endpoint::get("patients/")
            .param_opt("page", Some(2))
            .param_opt("search", Some(""))
            .param_opt::<u32>("page_size", None);
        assert_eq!(ep.path_and_query(), "patients/?page=2");
    }

    #[test]
    fn test_query_is_encoded() {
        let ep: Endpoint<()> = Endpoint::get("users/").param("search", "ann lee&co");
        assert_eq!(ep.path_and_query(), "users/?search=ann%20lee%26co");
        assert_eq!(ep.cache_key(), "GET users/?search=ann%20lee%26co");
    }

    #[test]
    fn test_cache_key_override() {
        let ep: Endpoint<()> = Endpoint::get("chat/rooms/")
            .param("page", 3)
            .cache_key_override("chat_rooms");
        assert_eq!(ep.cache_key(), "chat_rooms");
    }
}
