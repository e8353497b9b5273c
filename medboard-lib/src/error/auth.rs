//! Authentication error types

/// Errors raised when a request needs credentials that are not available.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No session is stored; the user has to log in first.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The stored access token expired and no refreshed token was supplied.
    #[error("Token expired: {message}")]
    TokenExpired { message: String },
}
