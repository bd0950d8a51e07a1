//! Booking domain: booking records, the status state machine, and interval
//! overlap arithmetic.

pub mod model;
pub mod status;

pub use model::{intervals_overlap, Booking, BookingDetail, BookingFilter, NewBooking};
pub use status::BookingStatus;
