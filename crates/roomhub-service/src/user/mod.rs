//! User registration, profiles and administration.

pub mod service;

pub use service::{RegisterRequest, UpdatePasswordRequest, UpdateProfileRequest, UserService};
