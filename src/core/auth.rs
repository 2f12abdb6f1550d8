//! Authentication stub
//!
//! The service only needs *a* principal per request; nothing downstream
//! inspects it. Providers turn request headers into an [`AuthContext`] or
//! reject the request.

use crate::core::error::{PetstoreError, PetstoreResult};
use async_trait::async_trait;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;

/// Principal extracted from a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthContext {
    /// Caller identified by a token
    User {
        subject: String,
        name: String,
        scopes: Vec<String>,
    },

    /// No authentication (public access)
    Anonymous,
}

impl AuthContext {
    /// Subject of the principal, if any
    pub fn subject(&self) -> Option<&str> {
        match self {
            AuthContext::User { subject, .. } => Some(subject),
            AuthContext::Anonymous => None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, AuthContext::Anonymous)
    }
}

/// Trait for auth providers
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Extract auth context from the request headers
    async fn extract_context(&self, headers: &HeaderMap) -> PetstoreResult<AuthContext>;
}

/// Default no-auth provider (for development)
pub struct NoAuthProvider;

#[async_trait]
impl AuthProvider for NoAuthProvider {
    async fn extract_context(&self, _headers: &HeaderMap) -> PetstoreResult<AuthContext> {
        Ok(AuthContext::Anonymous)
    }
}

/// Accepts any non-empty bearer token and maps it to a fixed principal
///
/// Token decoding is not implemented; the provider only enforces that a
/// bearer credential is present.
#[derive(Debug, Clone)]
pub struct BearerTokenAuth {
    principal: AuthContext,
}

impl BearerTokenAuth {
    pub fn new(principal: AuthContext) -> Self {
        Self { principal }
    }
}

impl Default for BearerTokenAuth {
    fn default() -> Self {
        Self::new(AuthContext::User {
            subject: "1234567890".to_string(),
            name: "John Doe".to_string(),
            scopes: Vec::new(),
        })
    }
}

/// Read the token of an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[async_trait]
impl AuthProvider for BearerTokenAuth {
    async fn extract_context(&self, headers: &HeaderMap) -> PetstoreResult<AuthContext> {
        match bearer_token(headers) {
            Some(_) => Ok(self.principal.clone()),
            None => Err(PetstoreError::Unauthorized {
                message: "missing bearer token".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&headers("Bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers("bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers("Basic abc")), None);
        assert_eq!(bearer_token(&headers("Bearer   ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[tokio::test]
    async fn test_bearer_auth_accepts_token() {
        let ctx = BearerTokenAuth::default()
            .extract_context(&headers("Bearer TestJWTtoken"))
            .await
            .unwrap();
        assert_eq!(ctx.subject(), Some("1234567890"));
    }

    #[tokio::test]
    async fn test_bearer_auth_rejects_missing_token() {
        let err = BearerTokenAuth::default()
            .extract_context(&HeaderMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, PetstoreError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_no_auth_is_anonymous() {
        let ctx = NoAuthProvider.extract_context(&HeaderMap::new()).await.unwrap();
        assert!(ctx.is_anonymous());
    }
}
