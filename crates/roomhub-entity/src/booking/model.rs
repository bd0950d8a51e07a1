//! Booking entity model and interval arithmetic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::BookingStatus;

/// A booking of a meeting room for a time interval.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    /// Unique booking identifier.
    pub id: Uuid,
    /// User who placed the booking.
    pub user_id: Uuid,
    /// Room being booked.
    pub room_id: Uuid,
    /// Start of the reserved interval.
    pub start_time: DateTime<Utc>,
    /// End of the reserved interval.
    pub end_time: DateTime<Utc>,
    /// Current lifecycle status.
    pub status: BookingStatus,
    /// Optional note from the booker.
    pub note: String,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// When the booking was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to propose a new booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBooking {
    pub user_id: Uuid,
    pub room_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub note: String,
}

/// Search filter for the booking list. All fields are optional and combine
/// with AND semantics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingFilter {
    /// Substring match against the booker's username.
    pub username: Option<String>,
    /// Substring match against the room name.
    pub room_name: Option<String>,
    /// Substring match against the room location.
    pub room_location: Option<String>,
    /// Only bookings starting at or after this instant.
    pub start_after: Option<DateTime<Utc>>,
    /// Only bookings ending at or before this instant.
    pub end_before: Option<DateTime<Utc>>,
    /// Only bookings in this status.
    pub status: Option<BookingStatus>,
}

/// Booking joined with booker and room summary data, as returned by list
/// and search endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookingDetail {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub room_id: Uuid,
    pub room_name: String,
    pub room_location: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: BookingStatus,
    pub note: String,
    pub created_at: DateTime<Utc>,
}

/// Whether two closed time intervals overlap.
///
/// Intervals are treated as closed on both ends, so intervals that merely
/// touch at an endpoint (one ends exactly when the other starts) do overlap.
pub fn intervals_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start <= b_end && a_end >= b_start
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, hour, min, 0).unwrap()
    }

    #[test]
    fn contained_interval_overlaps() {
        // Existing 10:00-11:00, proposed 10:30-10:45 sits fully inside.
        assert!(intervals_overlap(at(10, 0), at(11, 0), at(10, 30), at(10, 45)));
    }

    #[test]
    fn partial_overlap_detected() {
        assert!(intervals_overlap(at(10, 0), at(11, 0), at(10, 30), at(11, 30)));
        assert!(intervals_overlap(at(10, 30), at(11, 30), at(10, 0), at(11, 0)));
    }

    #[test]
    fn containing_interval_overlaps() {
        assert!(intervals_overlap(at(10, 30), at(10, 45), at(10, 0), at(11, 0)));
    }

    #[test]
    fn touching_endpoints_overlap() {
        // Closed intervals: a booking ending at 11:00 still conflicts with
        // one starting at 11:00.
        assert!(intervals_overlap(at(10, 0), at(11, 0), at(11, 0), at(12, 0)));
        assert!(intervals_overlap(at(11, 0), at(12, 0), at(10, 0), at(11, 0)));
    }

    #[test]
    fn disjoint_intervals_do_not_overlap() {
        assert!(!intervals_overlap(at(10, 0), at(11, 0), at(12, 0), at(13, 0)));
        assert!(!intervals_overlap(at(12, 0), at(13, 0), at(10, 0), at(11, 0)));
    }
}
