pub mod bookings;
pub mod locations;
pub mod settings;
