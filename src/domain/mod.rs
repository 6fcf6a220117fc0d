pub mod booking;
pub mod dates;
pub mod entity;
pub mod validation;

pub use booking::Booking;
pub use entity::EntityKind;
