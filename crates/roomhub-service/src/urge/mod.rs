//! Urge notifications with TTL-based throttling.

pub mod throttle;

pub use throttle::{UrgeOutcome, UrgeThrottle};
