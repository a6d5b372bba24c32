//! Caller context extractor.
//!
//! Resolves the caller's roles from the `X-Roles` header into a typed
//! [`CallerContext`]. The upstream gateway authenticates the request and
//! forwards the role list; this layer only interprets it.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap, StatusCode},
};
use lookup_store::caller::CallerContext;

/// The header carrying the authenticated caller's roles, comma-separated.
pub const X_ROLES: &str = "x-roles";

/// Axum extractor for the caller context.
///
/// A missing or empty header yields an anonymous, non-administrator caller.
/// The `includeSoftDeleted` flag is applied later from the query string by
/// the list/read parameter extractors.
#[derive(Debug, Clone, Copy)]
pub struct CallerExtractor(pub CallerContext);

impl CallerExtractor {
    /// Returns the caller context.
    pub fn context(&self) -> CallerContext {
        self.0
    }
}

/// Parses the roles header into a caller context.
fn caller_from_headers(headers: &HeaderMap) -> CallerContext {
    let roles = headers
        .get(X_ROLES)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    CallerContext::from_roles(roles.split(',').map(str::trim).filter(|r| !r.is_empty()))
}

impl<S> FromRequestParts<S> for CallerExtractor
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CallerExtractor(caller_from_headers(&parts.headers)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_missing_header_is_anonymous() {
        let caller = caller_from_headers(&HeaderMap::new());
        assert!(!caller.is_admin());
    }

    #[test]
    fn test_admin_role_detected() {
        let mut headers = HeaderMap::new();
        headers.insert(X_ROLES, HeaderValue::from_static("Copilot, Administrator"));
        assert!(caller_from_headers(&headers).is_admin());
    }

    #[test]
    fn test_non_admin_roles() {
        let mut headers = HeaderMap::new();
        headers.insert(X_ROLES, HeaderValue::from_static("Copilot"));
        assert!(!caller_from_headers(&headers).is_admin());
    }
}
