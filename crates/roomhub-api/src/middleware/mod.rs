//! HTTP middleware.

pub mod guard;
