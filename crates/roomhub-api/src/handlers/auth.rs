//! Login and token refresh handlers.
//!
//! The admin flag is fixed by the route, never read from the request body.
//! `/user/login` and `/user/admin/login` are separate surfaces with separate
//! refresh endpoints.

use axum::Json;
use axum::extract::State;

use crate::error::ApiError;

use super::validate_dto;
use crate::dto::request::{LoginRequest, RefreshRequest};
use crate::dto::response::{LoginResponse, RefreshResponse};
use crate::state::AppState;

async fn do_login(
    state: AppState,
    body: LoginRequest,
    is_admin: bool,
) -> Result<Json<LoginResponse>, ApiError> {
    let body = validate_dto(body)?;
    let (identity, pair) = state
        .auth_service
        .login(&body.username, &body.password, is_admin)
        .await?;
    Ok(Json(LoginResponse {
        user_info: identity.into(),
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
    }))
}

async fn do_refresh(
    state: AppState,
    body: RefreshRequest,
    is_admin: bool,
) -> Result<Json<RefreshResponse>, ApiError> {
    let body = validate_dto(body)?;
    let (_, pair) = state
        .auth_service
        .refresh(&body.refresh_token, is_admin)
        .await?;
    Ok(Json(RefreshResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
    }))
}

/// POST /api/user/login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    do_login(state, body, false).await
}

/// POST /api/user/admin/login
pub async fn admin_login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    do_login(state, body, true).await
}

/// POST /api/user/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, ApiError> {
    do_refresh(state, body, false).await
}

/// POST /api/user/admin/refresh
pub async fn admin_refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, ApiError> {
    do_refresh(state, body, true).await
}
