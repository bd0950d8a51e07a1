//! Booking handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use crate::error::ApiError;
use roomhub_core::types::pagination::{PageRequest, PageResponse};
use roomhub_entity::booking::{Booking, BookingDetail, BookingFilter, NewBooking};

use super::validate_dto;
use crate::dto::request::{BookingListQuery, CreateBookingDto};
use crate::dto::response::UrgeResponse;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// GET /api/booking/list
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<BookingListQuery>,
) -> Result<Json<PageResponse<BookingDetail>>, ApiError> {
    let page = PageRequest::new(query.page.unwrap_or(1), query.page_size.unwrap_or(10));
    let filter = BookingFilter {
        username: query.username,
        room_name: query.room_name,
        room_location: query.room_location,
        start_after: query.start_after,
        end_before: query.end_before,
        status: query.status,
    };
    let bookings = state.booking_service.search(&filter, &page).await?;
    Ok(Json(bookings))
}

/// POST /api/booking/add
pub async fn add(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<CreateBookingDto>,
) -> Result<Json<Booking>, ApiError> {
    let body = validate_dto(body)?;
    let booking = state
        .booking_service
        .propose(NewBooking {
            user_id: user.user_id,
            room_id: body.room_id,
            start_time: body.start_time,
            end_time: body.end_time,
            note: body.note,
        })
        .await?;
    Ok(Json(booking))
}

/// POST /api/booking/{id}/approve
pub async fn approve(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, ApiError> {
    let booking = state.booking_service.approve(id).await?;
    Ok(Json(booking))
}

/// POST /api/booking/{id}/reject
pub async fn reject(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, ApiError> {
    let booking = state.booking_service.reject(id).await?;
    Ok(Json(booking))
}

/// POST /api/booking/{id}/release
pub async fn release(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, ApiError> {
    let booking = state.booking_service.release(id).await?;
    Ok(Json(booking))
}

/// POST /api/booking/{id}/urge
pub async fn urge(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UrgeResponse>, ApiError> {
    // Ensure the booking exists before opening a throttle window for it.
    state.booking_service.find(id).await?;
    let outcome = state.urge_throttle.try_notify(id).await?;
    Ok(Json(outcome.into()))
}
