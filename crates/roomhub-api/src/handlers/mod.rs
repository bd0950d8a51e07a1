//! Route handlers.

pub mod auth;
pub mod booking;
pub mod health;
pub mod room;
pub mod statistic;
pub mod user;

use roomhub_core::error::AppError;
use crate::error::ApiError;
use validator::Validate;

/// Run validator-derived checks on a request body.
fn validate_dto<T: Validate>(dto: T) -> Result<T, ApiError> {
    dto.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    Ok(dto)
}
