pub mod availability;
pub mod booking;
pub mod common;
pub mod pagination;
pub mod scooter;
pub mod shop;
pub mod user;

pub use availability::*;
pub use booking::*;
pub use common::*;
pub use pagination::*;
pub use scooter::*;
pub use shop::*;
pub use user::*;
