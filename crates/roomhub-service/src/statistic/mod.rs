//! Aggregate booking statistics.

pub mod service;

pub use service::StatisticService;
