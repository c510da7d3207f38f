pub mod auth;
pub mod booking;
pub mod scooter;
pub mod shop;

pub use auth::auth_config;
pub use booking::booking_config;
pub use scooter::scooter_config;
pub use shop::shop_config;
