//! Concrete repository implementations.

pub mod booking;
pub mod room;
pub mod statistic;
pub mod user;

pub use booking::BookingRepository;
pub use room::RoomRepository;
pub use statistic::StatisticRepository;
pub use user::UserRepository;
