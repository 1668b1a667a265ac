//! Domain models for the order pipeline.

pub mod order;
pub mod user;

pub use order::Order;
pub use user::User;
