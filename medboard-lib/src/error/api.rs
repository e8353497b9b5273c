//! API error types

use std::time::Duration;

/// Errors that can occur while calling the REST backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP error response from the API.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message (the `detail` field when the body carries one, else the raw body).
        message: String,
        /// Field-level errors reported by the backend, keyed by field name.
        fields: Vec<(String, String)>,
    },

    /// Network error during API call.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse API response.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

impl ApiError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Builds an HTTP error from a response body.
    ///
    /// The backend answers errors with either `{"detail": "..."}` or a map of
    /// field name to a list of messages. Anything else is kept verbatim.
    pub fn from_body(status: u16, body: &str) -> Self {
        let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) else {
            return Self::http(status, body);
        };

        if let Some(detail) = map.get("detail").and_then(|d| d.as_str()) {
            return Self::http(status, detail);
        }

        let fields: Vec<(String, String)> = map
            .iter()
            .filter_map(|(field, messages)| {
                let text = match messages {
                    serde_json::Value::String(s) => s.clone(),
                    serde_json::Value::Array(items) => items
                        .iter()
                        .filter_map(|m| m.as_str())
                        .collect::<Vec<_>>()
                        .join(" "),
                    _ => return None,
                };
                Some((field.clone(), text))
            })
            .collect();

        let message = if fields.is_empty() {
            body.to_string()
        } else {
            fields
                .iter()
                .map(|(field, text)| format!("{}: {}", field, text))
                .collect::<Vec<_>>()
                .join("; ")
        };

        Self::Http {
            status,
            message,
            fields,
        }
    }

    /// Creates a new parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: None,
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if this error is potentially retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            Self::Network(_) => true,
            Self::Timeout(_) => true,
            _ => false,
        }
    }
}
