//! # roomhub-cache
//!
//! Cache providers for RoomHub: a Redis backend for deployments and an
//! in-memory backend for development and tests. The urge throttle, captcha
//! codes and the cached admin address all live behind the
//! [`CacheProvider`](roomhub_core::traits::cache::CacheProvider) trait.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::CacheManager;
