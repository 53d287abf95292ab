//! External distance lookup used by the address-based location strategy.

mod client;
pub mod matrix;

use async_trait::async_trait;

use crate::error::AppError;

pub use client::{HttpDistanceProvider, HttpDistanceProviderConfig, DEFAULT_USER_AGENT};

/// Resolves a pair of free-text addresses to a travel distance.
#[async_trait]
pub trait DistanceProvider: Send + Sync {
    /// Travel distance from `origin` to `destination` in kilometers.
    ///
    /// Fails with `ProviderUnavailable` when the service cannot be reached
    /// or answers with an error, and `ProviderDataMissing` when the answer
    /// carries no usable distance.
    async fn distance_km(&self, origin: &str, destination: &str) -> Result<f64, AppError>;
}
