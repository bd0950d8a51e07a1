//! Meeting room domain.

pub mod model;

pub use model::{CreateRoom, MeetingRoom, UpdateRoom};
