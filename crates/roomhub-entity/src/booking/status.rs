//! Booking status state machine.

use std::fmt;
use std::str::FromStr;

use roomhub_core::error::AppError;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a booking.
///
/// Transitions: `Pending` may move to `Approved`, `Rejected`, or `Released`.
/// `Approved` may only move to `Released`. `Rejected` and `Released` are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Awaiting administrator review.
    Pending,
    /// Approved by an administrator.
    Approved,
    /// Rejected by an administrator.
    Rejected,
    /// Released by the booker or an administrator.
    Released,
}

impl BookingStatus {
    /// Whether a booking in this status blocks overlapping proposals.
    pub fn is_blocking(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Approved)
    }

    /// Whether no further transitions are allowed from this status.
    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Rejected | BookingStatus::Released)
    }

    /// Whether a transition from `self` to `next` is legal.
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        match (self, next) {
            (BookingStatus::Pending, BookingStatus::Approved)
            | (BookingStatus::Pending, BookingStatus::Rejected)
            | (BookingStatus::Pending, BookingStatus::Released)
            | (BookingStatus::Approved, BookingStatus::Released) => true,
            _ => false,
        }
    }

    /// Stable lowercase name, matching the database enum labels.
    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Approved => "approved",
            BookingStatus::Rejected => "rejected",
            BookingStatus::Released => "released",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "approved" => Ok(BookingStatus::Approved),
            "rejected" => Ok(BookingStatus::Rejected),
            "released" => Ok(BookingStatus::Released),
            other => Err(AppError::validation(format!(
                "unknown booking status: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_transitions() {
        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Approved));
        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Rejected));
        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Released));
        assert!(!BookingStatus::Pending.can_transition_to(BookingStatus::Pending));
    }

    #[test]
    fn approved_only_releases() {
        assert!(BookingStatus::Approved.can_transition_to(BookingStatus::Released));
        assert!(!BookingStatus::Approved.can_transition_to(BookingStatus::Pending));
        assert!(!BookingStatus::Approved.can_transition_to(BookingStatus::Rejected));
        assert!(!BookingStatus::Approved.can_transition_to(BookingStatus::Approved));
    }

    #[test]
    fn terminal_statuses_allow_nothing() {
        for terminal in [BookingStatus::Rejected, BookingStatus::Released] {
            assert!(terminal.is_terminal());
            for next in [
                BookingStatus::Pending,
                BookingStatus::Approved,
                BookingStatus::Rejected,
                BookingStatus::Released,
            ] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn blocking_statuses() {
        assert!(BookingStatus::Pending.is_blocking());
        assert!(BookingStatus::Approved.is_blocking());
        assert!(!BookingStatus::Rejected.is_blocking());
        assert!(!BookingStatus::Released.is_blocking());
    }

    #[test]
    fn parse_round_trip() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Approved,
            BookingStatus::Rejected,
            BookingStatus::Released,
        ] {
            assert_eq!(status.as_str().parse::<BookingStatus>().unwrap(), status);
        }
        assert!("cancelled".parse::<BookingStatus>().is_err());
    }
}
