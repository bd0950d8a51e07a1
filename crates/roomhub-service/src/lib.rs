//! # roomhub-service
//!
//! Business logic for RoomHub. Services orchestrate repositories, the cache,
//! token issuance and outbound mail; HTTP concerns stay in the api crate.

pub mod auth;
pub mod booking;
pub mod context;
pub mod room;
pub mod statistic;
pub mod urge;
pub mod user;

pub use context::RequestContext;
