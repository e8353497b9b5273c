//! Error types

mod api;
mod auth;
mod store;
mod table;

pub use api::*;
pub use auth::*;
pub use store::*;
pub use table::*;

use std::time::Duration;

use crate::model::KycStatus;

/// Top-level error returned by client, store and page operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error talking to the REST backend.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// No usable credentials for the request.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Persisted state could not be read or written.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Invalid table configuration or table operation.
    #[error(transparent)]
    Table(#[from] TableError),

    /// Rejecting or suspending a KYC record needs a non-blank reason.
    #[error("a reason is required to set KYC status {0}")]
    KycReasonRequired(KycStatus),

    /// Cancelling an appointment needs a non-blank reason.
    #[error("a cancellation reason is required")]
    CancellationReasonRequired,

    /// The backend kept answering 429 after all retries were spent.
    #[error("Rate limited{}", .retry_after.map(|d| format!(", retry after {:?}", d)).unwrap_or_default())]
    RateLimit {
        /// Delay suggested by the `Retry-After` header, if any.
        retry_after: Option<Duration>,
    },
}

impl Error {
    /// Returns the HTTP status code if the backend answered with an error status.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(api) => api.status_code(),
            Self::RateLimit { .. } => Some(429),
            _ => None,
        }
    }

    /// Returns `true` if the backend reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}
