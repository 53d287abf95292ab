use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedLocation {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl NamedLocation {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

pub fn default_locations() -> Vec<NamedLocation> {
    [
        ("Dhanmondi", 23.7461, 90.3742),
        ("Uttara", 23.8748, 90.3984),
        ("Gulshan", 23.7925, 90.4078),
        ("Banani", 23.7937, 90.4066),
        ("Mirpur", 23.8223, 90.3654),
        ("Motijheel", 23.7330, 90.4172),
        ("Mohammadpur", 23.7662, 90.3589),
    ]
    .into_iter()
    .map(|(name, lat, lng)| NamedLocation {
        name: name.to_string(),
        lat,
        lng,
    })
    .collect()
}
