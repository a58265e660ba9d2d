//! Authentication routes
//!
//! Registration, login, and logout. Login sets the signed session cookie;
//! logout destroys the session and clears the cookie.
//!
//! # Performance
//!
//! Password hashing and verification run on the blocking thread pool and
//! never stall the async runtime.

use crate::auth::resolve_session_id;
use crate::config::AppConfig;
use crate::error::ApiResult;
use crate::services::UserService;
use crate::session::{build_session_cookie, clear_session_cookie, sign_session_id};
use crate::state::AppState;
use auth_gateway_shared::types::{LoginRequest, MessageResponse, RegisterRequest, UserResponse};
use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap},
    response::AppendHeaders,
    routing::{get, post},
    Json, Router,
};
use tracing::info;

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", get(logout))
}

/// Register a new user
///
/// POST /api/register
///
/// Registration does not start a session; the user logs in afterwards.
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user = UserService::register(&state.db, &req.username, &req.email, &req.password).await?;
    info!(username = %user.username, "User registered");
    Ok(Json(user))
}

/// Login with username and password
///
/// POST /api/login
///
/// On success the session ID is signed with the session secret and sent
/// as an HttpOnly cookie (Secure in production).
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<(
    AppendHeaders<[(axum::http::HeaderName, String); 1]>,
    Json<MessageResponse>,
)> {
    let outcome =
        UserService::login(&state.db, state.sessions.as_ref(), &req.username, &req.password)
            .await?;

    let session_cfg = &state.config.session;
    let signed = sign_session_id(&outcome.session_id, &session_cfg.secret);
    let cookie = build_session_cookie(
        &session_cfg.cookie_name,
        &signed,
        session_cfg.ttl_secs,
        AppConfig::is_production(),
    );

    info!(username = %req.username, "User logged in");

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(MessageResponse {
            message: outcome.message,
        }),
    ))
}

/// Log out the caller
///
/// GET /api/logout
///
/// Destroys the session when the cookie resolves to one; answering an
/// anonymous caller with 200 keeps logout idempotent.
async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<(
    AppendHeaders<[(axum::http::HeaderName, String); 1]>,
    Json<MessageResponse>,
)> {
    let session_id = resolve_session_id(&state, &headers);
    UserService::logout(state.sessions.as_ref(), session_id.as_deref()).await?;

    let cookie = clear_session_cookie(
        &state.config.session.cookie_name,
        AppConfig::is_production(),
    );

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(MessageResponse {
            message: "User was logged out".to_string(),
        }),
    ))
}
