use serde::{Deserialize, Serialize};

/// Resolved trip distances in kilometers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Legs {
    pub garage_to_pickup_km: f64,
    pub pickup_to_drop_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub distance_garage_to_pickup: f64,
    pub distance_pickup_to_drop: f64,
    pub total_distance: f64,
    pub garage_to_pickup_charge: f64,
    pub pickup_to_drop_charge: f64,
    pub surcharge_urgent: bool,
    pub surcharge_weekend: bool,
    pub urgent_percent: f64,
    pub weekend_percent: f64,
    pub final_price: f64,
}
