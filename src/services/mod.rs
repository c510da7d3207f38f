pub mod auth_service;
pub mod availability_service;
pub mod booking_service;
pub mod scooter_service;
pub mod shop_service;

pub use auth_service::*;
pub use availability_service::*;
pub use booking_service::*;
pub use scooter_service::*;
pub use shop_service::*;
