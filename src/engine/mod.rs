pub mod admission;
pub mod booking;
pub mod pricing;
pub mod resolver;
