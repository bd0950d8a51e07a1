//! # roomhub-entity
//!
//! Domain entity models for RoomHub: users with their roles and permission
//! codes, meeting rooms, and bookings with the booking status state machine.

pub mod booking;
pub mod room;
pub mod user;
