//! Request bodies and query parameters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use roomhub_entity::booking::BookingStatus;

/// Login request for either login surface.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Token refresh request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

/// Query parameter for the captcha endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CaptchaQuery {
    #[validate(email)]
    pub email: String,
}

/// Self-service registration request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterDto {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(length(min = 1, max = 50))]
    pub nick_name: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(equal = 6))]
    pub captcha: String,
}

/// Captcha-verified password change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdatePasswordDto {
    #[validate(length(min = 1, max = 128))]
    pub password: String,
    #[validate(length(equal = 6))]
    pub captcha: String,
}

/// Captcha-verified profile update request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUserDto {
    #[validate(length(min = 1, max = 50))]
    pub nick_name: Option<String>,
    #[validate(length(max = 255))]
    pub head_pic: Option<String>,
    #[validate(length(equal = 6))]
    pub captcha: String,
}

/// Meeting room creation request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRoomDto {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(range(min = 1))]
    pub capacity: i32,
    #[validate(length(min = 1, max = 100))]
    pub location: String,
    #[serde(default)]
    pub equipment: String,
    #[serde(default)]
    pub description: String,
}

/// Partial meeting room update request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateRoomDto {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
    #[validate(length(min = 1, max = 100))]
    pub location: Option<String>,
    pub equipment: Option<String>,
    pub description: Option<String>,
}

/// Booking proposal request. The booker is taken from the request context,
/// never from the body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBookingDto {
    pub room_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub note: String,
}

/// Query parameters for the user list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserListQuery {
    pub username: Option<String>,
    pub nick_name: Option<String>,
    pub email: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// Query parameters for the room list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomListQuery {
    pub name: Option<String>,
    pub capacity: Option<i32>,
    pub equipment: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// Query parameters for the booking list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingListQuery {
    pub username: Option<String>,
    pub room_name: Option<String>,
    pub room_location: Option<String>,
    pub start_after: Option<DateTime<Utc>>,
    pub end_before: Option<DateTime<Utc>>,
    pub status: Option<BookingStatus>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// Time window for the statistics endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatWindowQuery {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}
