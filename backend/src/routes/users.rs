//! User listing routes
//!
//! Two guarded flavors of the same listing: `/users` uses the route-local
//! [`CurrentUser`] extractor, `/restricted/users` relies solely on the
//! global access guard (any `/api/restricted/*` path is off the
//! allow-list).

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use auth_gateway_shared::types::UserResponse;
use axum::{extract::State, routing::get, Json, Router};

/// Create user listing routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/restricted/users", get(list_users_restricted))
}

/// List all users (route-local guard)
///
/// GET /api/users
async fn list_users(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = UserService::list_users(&state.db).await?;
    Ok(Json(users))
}

/// List all users (guarded by the global allow-list mechanism)
///
/// GET /api/restricted/users
async fn list_users_restricted(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = UserService::list_users(&state.db).await?;
    Ok(Json(users))
}
