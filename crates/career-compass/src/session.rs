//! Identity handed to the core by the upstream identity provider.
//!
//! The core never authenticates anyone. It receives an [`Identity`] (over HTTP, through the
//! `x-user-id` / `x-user-email` headers set by the auth proxy) and scopes a [`SessionContext`]
//! to it. The assessment flow and the college recommender both read the current user from the
//! context they were constructed with, so attaching or detaching it is the only lifecycle they
//! observe.

use std::fmt;
use std::sync::{Arc, RwLock};

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// Stable identifier issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Authenticated user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Identity {
    pub fn new(user_id: impl Into<String>, email: Option<String>) -> Self {
        Self {
            user_id: UserId(user_id.into()),
            email,
        }
    }

    fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let user_id = headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())?;
        let email = headers
            .get(USER_EMAIL_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        Some(Self::new(user_id, email))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_headers(&parts.headers).ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "authentication required" })),
            )
        })
    }
}

/// Accessors the core needs from the identity provider.
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> Option<Identity>;
    fn sign_out(&self);
}

/// Shared handle to the identity the flow and recommender operate on behalf of.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    identity: Arc<RwLock<Option<Identity>>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attached(identity: Identity) -> Self {
        let session = Self::new();
        session.attach(identity);
        session
    }

    pub fn attach(&self, identity: Identity) {
        let mut guard = self
            .identity
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(identity);
    }

    /// Clear the identity, returning whoever was attached.
    pub fn detach(&self) -> Option<Identity> {
        let mut guard = self
            .identity
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.take()
    }

    pub fn is_attached(&self) -> bool {
        self.identity
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_some()
    }
}

impl IdentityProvider for SessionContext {
    fn current_user(&self) -> Option<Identity> {
        self.identity
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn sign_out(&self) {
        if let Some(identity) = self.detach() {
            info!(user_id = %identity.user_id, "session signed out");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn clones_observe_the_same_lifecycle() {
        let session = SessionContext::new();
        let observer = session.clone();
        assert!(observer.current_user().is_none());

        session.attach(Identity::new("user-1", None));
        assert_eq!(
            observer.current_user().map(|identity| identity.user_id),
            Some(UserId("user-1".to_string()))
        );

        observer.sign_out();
        assert!(!session.is_attached());
        assert!(session.detach().is_none());
    }

    #[test]
    fn identity_requires_a_non_blank_user_header() {
        let mut headers = HeaderMap::new();
        assert!(Identity::from_headers(&headers).is_none());

        headers.insert(USER_ID_HEADER, HeaderValue::from_static("   "));
        assert!(Identity::from_headers(&headers).is_none());

        headers.insert(USER_ID_HEADER, HeaderValue::from_static("stu-42"));
        headers.insert(USER_EMAIL_HEADER, HeaderValue::from_static(" asha@example.com "));
        let identity = Identity::from_headers(&headers).expect("identity present");
        assert_eq!(identity.user_id.0, "stu-42");
        assert_eq!(identity.email.as_deref(), Some("asha@example.com"));
    }
}
