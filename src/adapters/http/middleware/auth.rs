//! Authentication middleware and extractors for axum.
//!
//! This module provides:
//! - `auth_middleware` - Layer that validates the session token and injects the user
//! - `RequireAuth` - Extractor that reads the injected user
//!
//! Every playground route requires a session, so the middleware rejects
//! unauthenticated requests itself: browsers asking for HTML are redirected
//! to the login page, API clients get a 401.
//!
//! ```text
//! Request → auth_middleware → injects AuthenticatedUser into extensions
//!                                      ↓
//!                              Handler → RequireAuth extractor reads from extensions
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

/// Auth middleware state - the session validator plus where to send browsers.
#[derive(Clone)]
pub struct AuthState {
    validator: Arc<dyn SessionValidator>,
    login_path: Arc<str>,
    session_cookie: Arc<str>,
}

impl AuthState {
    pub fn new(
        validator: Arc<dyn SessionValidator>,
        login_path: impl Into<String>,
        session_cookie: impl Into<String>,
    ) -> Self {
        Self {
            validator,
            login_path: Arc::from(login_path.into()),
            session_cookie: Arc::from(session_cookie.into()),
        }
    }

    fn reject(&self, headers: &HeaderMap) -> AuthRejection {
        if accepts_html(headers) {
            AuthRejection::LoginRedirect(self.login_path.to_string())
        } else {
            AuthRejection::Unauthenticated
        }
    }
}

/// Authentication middleware.
///
/// The token is read from `Authorization: Bearer <token>`, falling back to
/// the session cookie. Missing or invalid tokens are rejected; an
/// unreachable auth service is a 503.
pub async fn auth_middleware(
    State(auth): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = bearer_token(request.headers())
        .or_else(|| cookie_value(request.headers(), &auth.session_cookie))
        .map(str::to_owned);

    let Some(token) = token else {
        return auth.reject(request.headers()).into_response();
    };

    match auth.validator.validate(&token).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(AuthError::ServiceUnavailable(msg)) => {
            tracing::error!("Auth service unavailable: {}", msg);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "error": "Authentication service unavailable",
                    "code": "AUTH_ERROR"
                })),
            )
                .into_response()
        }
        Err(e) => {
            tracing::debug!(uri = %request.uri(), "Rejected session: {}", e);
            auth.reject(request.headers()).into_response()
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|v| !v.is_empty())
}

fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Extractor that requires authentication.
///
/// Reads the user injected by [`auth_middleware`]; without one the request
/// is rejected with 401.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<AuthenticatedUser>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRejection {
    /// No valid session; API clients get a 401.
    Unauthenticated,
    /// No valid session; browsers are sent to the login page.
    LoginRedirect(String),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({
                    "error": "Authentication required",
                    "code": "UNAUTHENTICATED"
                })),
            )
                .into_response(),
            AuthRejection::LoginRedirect(path) => {
                (StatusCode::FOUND, [(header::LOCATION, path)]).into_response()
            }
        }
    }
}
