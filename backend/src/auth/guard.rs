//! Access guard
//!
//! Gates requests before any handler runs. Two forms of the same check:
//!
//! - [`access_guard`]: global middleware with a public allow-list; every
//!   other path must carry a valid session cookie.
//! - [`CurrentUser`]: a per-route extractor for handlers that must only
//!   run authenticated, independent of the global mechanism.

use crate::error::ApiError;
use crate::session::{verify_signed_value, SessionUser};
use crate::state::AppState;
use axum::{
    extract::{FromRef, Request, State},
    http::{header::COOKIE, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

/// Paths reachable without an authenticated session.
///
/// Logout is allow-listed on purpose: it must answer 200 for anonymous
/// callers too, destroying the session only when one resolves.
const PUBLIC_PATHS: &[&str] = &["/", "/api/register", "/api/login", "/api/logout"];

fn is_public(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path) || path.starts_with("/health")
}

/// Extract the raw session cookie value from the Cookie header, if any.
fn session_cookie_value(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let cookie_header = headers.get(COOKIE)?.to_str().ok()?;
    cookie_header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == cookie_name).then(|| value.to_string())
    })
}

/// Resolve the request's session cookie to an authenticated user.
///
/// Missing cookie, bad signature, and unknown or expired session IDs all
/// collapse to `None`; the caller decides whether that is a rejection.
/// Store failures propagate as errors, not as anonymous callers.
pub async fn resolve_session(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Option<SessionUser>, ApiError> {
    let Some(raw) = session_cookie_value(headers, &state.config.session.cookie_name) else {
        return Ok(None);
    };
    let Some(session_id) = verify_signed_value(&raw, &state.config.session.secret) else {
        return Ok(None);
    };
    state.sessions.get(&session_id).await
}

/// Resolve and return the session ID itself (for logout). Purely a
/// cookie-and-signature check; the store is not consulted.
pub fn resolve_session_id(state: &AppState, headers: &HeaderMap) -> Option<String> {
    let raw = session_cookie_value(headers, &state.config.session.cookie_name)?;
    verify_signed_value(&raw, &state.config.session.secret)
}

/// Global access guard middleware
///
/// Allow-listed paths pass straight through. Everything else resolves the
/// session cookie; failure short-circuits with 401 and the handler never
/// runs. On success the resolved user is attached to request extensions.
pub async fn access_guard(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if is_public(request.uri().path()) {
        return Ok(next.run(request).await);
    }

    let user = resolve_session(&state, request.headers())
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Authenticated user for a single route
///
/// The route-local variant of the guard. Reuses the user the global guard
/// already resolved when present, otherwise performs the same cookie
/// resolution itself.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionUser);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<SessionUser>() {
            return Ok(CurrentUser(user.clone()));
        }

        let app_state = AppState::from_ref(state);
        let user = resolve_session(&app_state, &parts.headers)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;

        Ok(CurrentUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use rstest::rstest;

    #[rstest]
    #[case("/")]
    #[case("/api/register")]
    #[case("/api/login")]
    #[case("/api/logout")]
    #[case("/health")]
    #[case("/health/ready")]
    fn test_public_paths(#[case] path: &str) {
        assert!(is_public(path));
    }

    #[rstest]
    #[case("/api/users")]
    #[case("/api/restricted/users")]
    #[case("/api")]
    fn test_protected_paths(#[case] path: &str) {
        assert!(!is_public(path));
    }

    #[test]
    fn test_session_cookie_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; user_session=sid.sig; lang=en"),
        );
        assert_eq!(
            session_cookie_value(&headers, "user_session"),
            Some("sid.sig".to_string())
        );
        assert_eq!(session_cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn test_no_cookie_header() {
        let headers = HeaderMap::new();
        assert_eq!(session_cookie_value(&headers, "user_session"), None);
    }
}
