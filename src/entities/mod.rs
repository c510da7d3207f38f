pub mod availability_overrides;
pub mod bookings;
pub mod scooters;
pub mod shops;
pub mod users;

pub use availability_overrides as availability_override_entity;
pub use bookings as booking_entity;
pub use scooters as scooter_entity;
pub use shops as shop_entity;
pub use users as user_entity;

pub use bookings::BookingStatus;
pub use users::UserRole;
