//! JWT token creation and validation.

pub mod claims;
pub mod decoder;
pub mod encoder;
