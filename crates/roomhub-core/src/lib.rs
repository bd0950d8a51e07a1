//! # roomhub-core
//!
//! Core building blocks shared by every RoomHub crate:
//!
//! - `error` / `result`: the unified [`AppError`] type and `AppResult` alias
//! - `config`: TOML + environment configuration schemas
//! - `types`: pagination and other shared value types
//! - `traits`: collaborator seams (cache, credential store, mailer)

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
