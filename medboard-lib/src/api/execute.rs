//! Request execution
//!
//! Turns an [`Endpoint`] into an HTTP request, applies the retry policy and
//! decodes the JSON body into the endpoint's response type.

use std::time::Duration;

use reqwest::Method;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use serde::de::DeserializeOwned;
use url::Url;

use super::endpoint::Endpoint;
use crate::MedboardClient;
use crate::error::ApiError;
use crate::error::Error;
use crate::retry::TransientFailure;

impl MedboardClient {
    /// Sends an endpoint and decodes the response into `T`.
    ///
    /// This bypasses the cache. Use [`AppStore::query`](crate::store::AppStore::query)
    /// for cached reads.
    pub async fn send<T: DeserializeOwned>(&self, endpoint: &Endpoint<T>) -> Result<T, Error> {
        let value = self.send_json(endpoint).await?;
        decode(value)
    }

    /// Sends an endpoint and returns the raw JSON body.
    ///
    /// An empty body (e.g. `204 No Content`) is returned as `null`.
    pub async fn send_json<T>(&self, endpoint: &Endpoint<T>) -> Result<serde_json::Value, Error> {
        let url = self.build_url(&endpoint.path_and_query())?;
        let body = endpoint.body.as_ref().map(|b| b.to_string());

        let response = self
            .request(endpoint.method.clone(), url.as_str(), body)
            .await?;

        let text = response.text().await.map_err(ApiError::from)?;
        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| Error::Api(ApiError::parse_with_body(e.to_string(), text)))
    }

    // =========================================================================
    // Helper methods
    // =========================================================================

    pub(crate) fn build_url(&self, path_and_query: &str) -> Result<Url, ApiError> {
        let base = self.inner.base_url.trim_end_matches('/');
        let base = Url::parse(&format!("{}/", base))
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.inner.base_url, e)))?;
        base.join(path_and_query.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", path_and_query, e)))
    }

    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        headers
    }

    /// Makes an HTTP request, resending it on transient failures.
    ///
    /// Error statuses other than 429 and 5xx are returned immediately.
    pub(crate) async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
    ) -> Result<reqwest::Response, Error> {
        let mut backoff = self.inner.retry_config.backoff();

        loop {
            log::debug!("{} {}", method, url);
            let (failure, retry_after, error) =
                match self.send_request_inner(method.clone(), url, body.clone()).await {
                    Ok(response) if response.status().is_success() => return Ok(response),
                    Ok(response) if response.status().as_u16() == 429 => {
                        let retry_after = parse_retry_after(&response);
                        (
                            TransientFailure::RateLimited,
                            retry_after,
                            Error::RateLimit { retry_after },
                        )
                    }
                    Ok(response) => {
                        let status = response.status();
                        let body = response.text().await.unwrap_or_default();
                        let error = Error::Api(ApiError::from_body(status.as_u16(), &body));
                        if !status.is_server_error() {
                            return Err(error);
                        }
                        (TransientFailure::Server, None, error)
                    }
                    Err(e @ Error::Api(ApiError::Network(_) | ApiError::Timeout(_))) => {
                        (TransientFailure::Network, None, e)
                    }
                    Err(e) => return Err(e),
                };

            match backoff.next(failure, retry_after) {
                Some(wait) => {
                    log::warn!("{} {} failed: {}, retrying in {:?}", method, url, error, wait);
                    tokio::time::sleep(wait).await;
                }
                None => return Err(error),
            }
        }
    }

    /// Inner request method without retry logic.
    async fn send_request_inner(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
    ) -> Result<reqwest::Response, Error> {
        let token = self.inner.token_provider.token().await?;

        let mut request = self
            .inner
            .http_client
            .request(method, url)
            .headers(self.default_headers());

        if let Some(token) = token {
            request = request.bearer_auth(&token.access_token);
        }

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        if let Some(body) = body {
            request = request.body(body);
        }

        request.send().await.map_err(|e| {
            match (e.is_timeout(), self.inner.timeout) {
                (true, Some(timeout)) => Error::Api(ApiError::Timeout(timeout)),
                _ => Error::Api(ApiError::from(e)),
            }
        })
    }
}

/// Decodes a cached or freshly fetched JSON value.
pub(crate) fn decode<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, Error> {
    let body = value.to_string();
    serde_json::from_value(value).map_err(|e| Error::Api(ApiError::parse_with_body(e.to_string(), body)))
}

/// Parses the Retry-After header value (seconds).
fn parse_retry_after(response: &reqwest::Response) -> Option<Duration> {
    response
        .headers()
        .get("Retry-After")?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::NoToken;

    fn client(base: &str) -> MedboardClient {
        MedboardClient::builder().url(base).token_provider(NoToken).build()
    }

    #[test]
    fn test_build_url_joins_relative_paths() {
        let c = client("https://api.example.com/api/v1");
        let url = c.build_url("patients/?page=2").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/api/v1/patients/?page=2");

        let c = client("https://api.example.com/api/v1/");
        let url = c.build_url("/doctors/7/").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/api/v1/doctors/7/");
    }

    #[test]
    fn test_build_url_rejects_garbage_base() {
        let c = client("not a url");
        assert!(matches!(c.build_url("patients/"), Err(ApiError::InvalidUrl(_))));
    }

    #[test]
    fn test_decode_unit_from_null() {
        let unit: () = decode(serde_json::Value::Null).unwrap();
        assert_eq!(unit, ());
    }

    #[test]
    fn test_decode_mismatch_keeps_body() {
        let err = decode::<u32>(serde_json::json!({"a": 1})).unwrap_err();
        match err {
            Error::Api(ApiError::Parse { body, .. }) => assert_eq!(body.as_deref(), Some("{\"a\":1}")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
