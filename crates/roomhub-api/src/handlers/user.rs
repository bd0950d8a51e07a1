//! Registration, captcha, profile and user administration handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use roomhub_core::error::AppError;
use roomhub_core::types::pagination::{PageRequest, PageResponse};
use roomhub_entity::user::User;
use roomhub_service::user::{RegisterRequest, UpdatePasswordRequest, UpdateProfileRequest};

use super::validate_dto;
use crate::error::ApiError;
use crate::dto::request::{
    CaptchaQuery, RegisterDto, UpdatePasswordDto, UpdateUserDto, UserListQuery,
};
use crate::dto::response::MessageResponse;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// GET /api/user/register-captcha?email=...
pub async fn register_captcha(
    State(state): State<AppState>,
    Query(query): Query<CaptchaQuery>,
) -> Result<Json<MessageResponse>, ApiError> {
    let query = validate_dto(query)?;
    state.user_service.send_register_captcha(&query.email).await?;
    Ok(Json(MessageResponse::new("Captcha sent")))
}

/// POST /api/user/register
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterDto>,
) -> Result<Json<User>, ApiError> {
    let body = validate_dto(body)?;
    let user = state
        .user_service
        .register(RegisterRequest {
            username: body.username,
            nick_name: body.nick_name,
            password: body.password,
            email: body.email,
            captcha: body.captcha,
        })
        .await?;
    Ok(Json(user))
}

/// GET /api/user/info
pub async fn info(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<User>, ApiError> {
    let user = state.user_service.info(user.user_id).await?;
    Ok(Json(user))
}

/// GET /api/user/update_password/captcha
///
/// The code goes to the logged-in user's own address; the client does not
/// choose the destination.
pub async fn update_password_captcha(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .user_service
        .send_update_password_captcha(&user.email)
        .await?;
    Ok(Json(MessageResponse::new("Captcha sent")))
}

/// POST /api/user/update_password
pub async fn update_password(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<UpdatePasswordDto>,
) -> Result<Json<MessageResponse>, ApiError> {
    let body = validate_dto(body)?;
    state
        .user_service
        .update_password(
            user.user_id,
            UpdatePasswordRequest {
                password: body.password,
                captcha: body.captcha,
            },
        )
        .await?;
    Ok(Json(MessageResponse::new("Password updated")))
}

/// GET /api/user/update/captcha
pub async fn update_user_captcha(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .user_service
        .send_update_user_captcha(&user.email)
        .await?;
    Ok(Json(MessageResponse::new("Captcha sent")))
}

/// POST /api/user/update
pub async fn update_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<UpdateUserDto>,
) -> Result<Json<User>, ApiError> {
    let body = validate_dto(body)?;
    let updated = state
        .user_service
        .update_profile(
            user.user_id,
            UpdateProfileRequest {
                nick_name: body.nick_name,
                head_pic: body.head_pic,
                captcha: body.captcha,
            },
        )
        .await?;
    Ok(Json(updated))
}

/// POST /api/user/{id}/freeze
pub async fn freeze(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !user.is_admin {
        return Err(AppError::forbidden("Administrator access required").into());
    }
    state.user_service.freeze(id).await?;
    Ok(Json(MessageResponse::new("User frozen")))
}

/// GET /api/user/list
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<UserListQuery>,
) -> Result<Json<PageResponse<User>>, ApiError> {
    if !user.is_admin {
        return Err(AppError::forbidden("Administrator access required").into());
    }
    let page = PageRequest::new(query.page.unwrap_or(1), query.page_size.unwrap_or(10));
    let users = state
        .user_service
        .list(
            query.username.as_deref(),
            query.nick_name.as_deref(),
            query.email.as_deref(),
            &page,
        )
        .await?;
    Ok(Json(users))
}
