//! # roomhub-api
//!
//! The HTTP surface of RoomHub: Axum routes with per-route access policies,
//! a single guard middleware, request/response DTOs and handlers.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
