//! User domain: accounts and their grants.

pub mod model;

pub use model::{CreateUser, UpdateUser, User};
