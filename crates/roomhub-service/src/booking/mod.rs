//! The booking engine: interval conflict checks, the status state machine
//! and the per-room locking that closes the check-then-insert race.

pub mod locks;
pub mod service;
pub mod store;

pub use locks::RoomLocks;
pub use service::BookingService;
pub use store::{BookingStore, SqlBookingStore};
