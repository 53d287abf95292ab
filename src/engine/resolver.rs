use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AppError;
use crate::geo::{haversine_km, Coordinate};
use crate::models::quote::Legs;
use crate::provider::DistanceProvider;
use crate::store::locations::LocationTable;

/// Turns a start and end into the two legs of a trip, garage to pickup and
/// pickup to drop-off.
#[async_trait]
pub trait LocationResolver: Send + Sync {
    async fn resolve_legs(&self, start: &str, end: &str) -> Result<Legs, AppError>;
}

/// Looks names up in the named-location table and measures great-circle
/// distance from the garage coordinate.
pub struct ManualResolver {
    table: Arc<LocationTable>,
    garage: Coordinate,
}

impl ManualResolver {
    pub fn new(table: Arc<LocationTable>, garage: Coordinate) -> Self {
        Self { table, garage }
    }

    fn lookup(&self, name: &str) -> Result<&Coordinate, AppError> {
        self.table
            .get(name)
            .ok_or_else(|| AppError::UnknownLocation(name.to_string()))
    }
}

#[async_trait]
impl LocationResolver for ManualResolver {
    async fn resolve_legs(&self, start: &str, end: &str) -> Result<Legs, AppError> {
        let pickup = self.lookup(start)?;
        let drop = self.lookup(end)?;

        Ok(Legs {
            garage_to_pickup_km: haversine_km(&self.garage, pickup),
            pickup_to_drop_km: haversine_km(pickup, drop),
        })
    }
}

/// Asks the external distance provider for both legs, starting from the
/// garage address. A failure on either leg fails the whole resolution.
pub struct ProviderResolver {
    provider: Arc<dyn DistanceProvider>,
    garage_address: String,
}

impl ProviderResolver {
    pub fn new(provider: Arc<dyn DistanceProvider>, garage_address: impl Into<String>) -> Self {
        Self {
            provider,
            garage_address: garage_address.into(),
        }
    }
}

#[async_trait]
impl LocationResolver for ProviderResolver {
    async fn resolve_legs(&self, start: &str, end: &str) -> Result<Legs, AppError> {
        let garage_to_pickup_km = self
            .provider
            .distance_km(&self.garage_address, start)
            .await?;
        let pickup_to_drop_km = self.provider.distance_km(start, end).await?;

        for km in [garage_to_pickup_km, pickup_to_drop_km] {
            if !km.is_finite() || km < 0.0 {
                return Err(AppError::ProviderDataMissing(format!(
                    "provider returned distance {km}"
                )));
            }
        }

        Ok(Legs {
            garage_to_pickup_km,
            pickup_to_drop_km,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::{LocationResolver, ManualResolver, ProviderResolver};
    use crate::error::AppError;
    use crate::geo::Coordinate;
    use crate::provider::DistanceProvider;
    use crate::store::locations::LocationDirectory;

    const GARAGE: Coordinate = Coordinate {
        lat: 23.7745,
        lng: 90.3654,
    };

    struct FixedDistances(HashMap<(&'static str, &'static str), Result<f64, &'static str>>);

    #[async_trait]
    impl DistanceProvider for FixedDistances {
        async fn distance_km(&self, origin: &str, destination: &str) -> Result<f64, AppError> {
            match self.0.iter().find(|((o, d), _)| *o == origin && *d == destination) {
                Some((_, Ok(km))) => Ok(*km),
                Some((_, Err(reason))) => Err(AppError::ProviderUnavailable(reason.to_string())),
                None => Err(AppError::ProviderDataMissing(format!(
                    "{origin} -> {destination}"
                ))),
            }
        }
    }

    fn manual() -> ManualResolver {
        let table = LocationDirectory::seeded().snapshot().unwrap();
        ManualResolver::new(table, GARAGE)
    }

    #[tokio::test]
    async fn manual_resolves_both_legs() {
        let legs = manual().resolve_legs("Dhanmondi", "Uttara").await.unwrap();

        assert!((legs.garage_to_pickup_km - 3.28).abs() < 0.01);
        assert!((legs.pickup_to_drop_km - 14.52).abs() < 0.01);
    }

    #[tokio::test]
    async fn manual_same_start_and_end_has_zero_second_leg() {
        let legs = manual().resolve_legs("Gulshan", "Gulshan").await.unwrap();
        assert!(legs.pickup_to_drop_km < 1e-9);
    }

    #[tokio::test]
    async fn manual_unknown_name_fails() {
        let err = manual()
            .resolve_legs("Dhanmondi", "Chittagong")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnknownLocation(name) if name == "Chittagong"));

        let err = manual().resolve_legs("uttara", "Uttara").await.unwrap_err();
        assert!(matches!(err, AppError::UnknownLocation(name) if name == "uttara"));
    }

    #[tokio::test]
    async fn provider_resolves_from_garage_address() {
        let provider = FixedDistances(HashMap::from([
            (("Garage Road", "House 12, Dhanmondi"), Ok(3.4)),
            (("House 12, Dhanmondi", "Sector 7, Uttara"), Ok(16.1)),
        ]));
        let resolver = ProviderResolver::new(Arc::new(provider), "Garage Road");

        let legs = resolver
            .resolve_legs("House 12, Dhanmondi", "Sector 7, Uttara")
            .await
            .unwrap();

        assert_eq!(legs.garage_to_pickup_km, 3.4);
        assert_eq!(legs.pickup_to_drop_km, 16.1);
    }

    #[tokio::test]
    async fn provider_failure_on_second_leg_aborts() {
        let provider = FixedDistances(HashMap::from([
            (("Garage Road", "A"), Ok(3.4)),
            (("A", "B"), Err("connection reset")),
        ]));
        let resolver = ProviderResolver::new(Arc::new(provider), "Garage Road");

        let err = resolver.resolve_legs("A", "B").await.unwrap_err();
        assert!(matches!(err, AppError::ProviderUnavailable(_)));
    }

    #[tokio::test]
    async fn provider_negative_distance_is_missing_data() {
        let provider = FixedDistances(HashMap::from([
            (("Garage Road", "A"), Ok(-1.0)),
            (("A", "B"), Ok(2.0)),
        ]));
        let resolver = ProviderResolver::new(Arc::new(provider), "Garage Road");

        let err = resolver.resolve_legs("A", "B").await.unwrap_err();
        assert!(matches!(err, AppError::ProviderDataMissing(_)));
    }
}
