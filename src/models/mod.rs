pub mod booking;
pub mod location;
pub mod pricing;
pub mod quote;
