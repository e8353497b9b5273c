//! Persisted authentication slice

use std::sync::Arc;
use std::sync::RwLock;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use super::AccessToken;
use super::TokenProvider;
use crate::error::AuthError;

/// The signed-in user as returned by the backend at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Role name (`admin`, `doctor`, `hospital`, `patient`).
    pub role: Option<String>,
}

/// The authentication state kept across restarts.
///
/// Only these four fields are persisted; query results never are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSlice {
    pub user: Option<SessionUser>,
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    pub is_authenticated: bool,
}

impl AuthSlice {
    /// Builds an authenticated slice from a token and optional user.
    pub fn signed_in(token: AccessToken, user: Option<SessionUser>) -> Self {
        Self {
            user,
            token: Some(token.access_token),
            refresh_token: token.refresh_token,
            is_authenticated: true,
        }
    }

    /// Returns the bearer token, if signed in.
    pub fn access_token(&self) -> Option<AccessToken> {
        if !self.is_authenticated {
            return None;
        }
        let token = self.token.as_ref()?;
        Some(match &self.refresh_token {
            Some(refresh) => AccessToken::with_refresh(token, None, refresh),
            None => AccessToken::new(token),
        })
    }
}

/// Shared handle to the live auth slice.
///
/// Cloned into the HTTP client as its [`TokenProvider`], so a login or
/// logout through the store changes the header of the very next request.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<AuthSlice>>,
}

impl SessionHandle {
    /// Creates a handle around an initial slice.
    pub fn new(slice: AuthSlice) -> Self {
        Self {
            inner: Arc::new(RwLock::new(slice)),
        }
    }

    /// Returns a copy of the current slice.
    pub fn snapshot(&self) -> AuthSlice {
        self.inner.read().map(|g| g.clone()).unwrap_or_default()
    }

    /// Replaces the current slice.
    pub fn replace(&self, slice: AuthSlice) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = slice;
        }
    }

    /// Resets to the signed-out state.
    pub fn clear(&self) {
        self.replace(AuthSlice::default());
    }

    /// Returns `true` if a session is active.
    pub fn is_authenticated(&self) -> bool {
        self.inner.read().map(|g| g.is_authenticated).unwrap_or(false)
    }
}

#[async_trait]
impl TokenProvider for SessionHandle {
    async fn token(&self) -> Result<Option<AccessToken>, AuthError> {
        Ok(self.snapshot().access_token())
    }
}
