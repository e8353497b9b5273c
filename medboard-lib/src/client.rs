//! Main MedboardClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::auth::TokenProvider;
use crate::retry::RetryConfig;

/// HTTP client for the dashboard REST backend.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across tasks. It knows nothing about caching; use
/// [`AppStore`](crate::store::AppStore) for cached queries and tag
/// invalidation.
///
/// # Example
///
/// ```ignore
/// use medboard_lib::{MedboardClient, auth::StaticTokenProvider};
/// use medboard_lib::api::Patients;
///
/// let client = MedboardClient::builder()
///     .url("https://api.example.com/api/v1/")
///     .token_provider(StaticTokenProvider::new("my-token"))
///     .build();
///
/// let patient = client.send(&Patients::get("42")).await?;
/// ```
#[derive(Clone)]
pub struct MedboardClient {
    pub(crate) inner: Arc<MedboardClientInner>,
}

pub(crate) struct MedboardClientInner {
    pub(crate) base_url: String,
    pub(crate) token_provider: Arc<dyn TokenProvider>,
    pub(crate) http_client: Client,
    pub(crate) timeout: Option<Duration>,
    pub(crate) retry_config: RetryConfig,
}

impl MedboardClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> MedboardClientBuilder<Missing, Missing> {
        MedboardClientBuilder::new()
    }

    /// Returns the base URL of the backend.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns the retry policy in use.
    pub fn retry_config(&self) -> &RetryConfig {
        &self.inner.retry_config
    }
}

impl std::fmt::Debug for MedboardClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MedboardClient")
            .field("base_url", &self.inner.base_url)
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`MedboardClient`].
///
/// Uses the typestate pattern so `build()` only exists once the base URL and
/// token provider are set.
pub struct MedboardClientBuilder<Url, Provider> {
    url: Url,
    token_provider: Provider,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    retry_config: RetryConfig,
    http_client: Option<Client>,
}

impl MedboardClientBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            token_provider: Missing,
            timeout: None,
            connect_timeout: None,
            retry_config: RetryConfig::default(),
            http_client: None,
        }
    }
}

impl Default for MedboardClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> MedboardClientBuilder<Missing, P> {
    /// Sets the API base URL, e.g. `https://api.example.com/api/v1/`.
    pub fn url(self, url: impl Into<String>) -> MedboardClientBuilder<Set<String>, P> {
        MedboardClientBuilder {
            url: Set(url.into()),
            token_provider: self.token_provider,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            retry_config: self.retry_config,
            http_client: self.http_client,
        }
    }
}

impl<U> MedboardClientBuilder<U, Missing> {
    /// Sets the token provider for authentication.
    pub fn token_provider<T: TokenProvider + 'static>(
        self,
        provider: T,
    ) -> MedboardClientBuilder<U, Set<Arc<dyn TokenProvider>>> {
        MedboardClientBuilder {
            url: self.url,
            token_provider: Set(Arc::new(provider) as Arc<dyn TokenProvider>),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            retry_config: self.retry_config,
            http_client: self.http_client,
        }
    }
}

impl<U, P> MedboardClientBuilder<U, P> {
    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the retry policy.
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl MedboardClientBuilder<Set<String>, Set<Arc<dyn TokenProvider>>> {
    /// Builds the [`MedboardClient`].
    pub fn build(self) -> MedboardClient {
        let http_client = self.http_client.unwrap_or_else(|| {
            let mut builder = Client::builder();
            if let Some(timeout) = self.connect_timeout {
                builder = builder.connect_timeout(timeout);
            }
            builder.build().unwrap_or_default()
        });

        MedboardClient {
            inner: Arc::new(MedboardClientInner {
                base_url: self.url.0,
                token_provider: self.token_provider.0,
                http_client,
                timeout: self.timeout,
                retry_config: self.retry_config,
            }),
        }
    }
}
