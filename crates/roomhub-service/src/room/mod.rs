//! Meeting room management.

pub mod service;

pub use service::RoomService;
