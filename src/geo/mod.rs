use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6_371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn validate(&self) -> Result<(), String> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(format!("latitude {} outside [-90, 90]", self.lat));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(format!("longitude {} outside [-180, 180]", self.lng));
        }
        Ok(())
    }
}

pub fn haversine_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let sin_lat = (delta_lat / 2.0).sin();
    let sin_lng = (delta_lng / 2.0).sin();

    // Rounding can push h a hair past 1 for near-antipodal points.
    let haversine =
        (sin_lat * sin_lat + lat1.cos() * lat2.cos() * sin_lng * sin_lng).clamp(0.0, 1.0);
    let central_angle = 2.0 * haversine.sqrt().asin();

    EARTH_RADIUS_KM * central_angle
}

#[cfg(test)]
mod tests {
    use super::{haversine_km, Coordinate};

    const GARAGE: Coordinate = Coordinate {
        lat: 23.7745,
        lng: 90.3654,
    };
    const DHANMONDI: Coordinate = Coordinate {
        lat: 23.7461,
        lng: 90.3742,
    };
    const UTTARA: Coordinate = Coordinate {
        lat: 23.8748,
        lng: 90.3984,
    };

    #[test]
    fn zero_distance_for_same_point() {
        let distance = haversine_km(&DHANMONDI, &DHANMONDI);
        assert!(distance < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let there = haversine_km(&DHANMONDI, &UTTARA);
        let back = haversine_km(&UTTARA, &DHANMONDI);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn garage_to_dhanmondi_is_around_3_3_km() {
        let distance = haversine_km(&GARAGE, &DHANMONDI);
        assert!((distance - 3.28).abs() < 0.01, "got {distance}");
    }

    #[test]
    fn dhanmondi_to_uttara_is_around_14_5_km() {
        let distance = haversine_km(&DHANMONDI, &UTTARA);
        assert!((distance - 14.52).abs() < 0.01, "got {distance}");
    }

    #[test]
    fn antipodal_points_are_half_the_circumference() {
        let a = Coordinate { lat: 0.0, lng: 0.0 };
        let b = Coordinate {
            lat: 0.0,
            lng: 180.0,
        };
        let distance = haversine_km(&a, &b);
        assert!(distance.is_finite());
        assert!((distance - std::f64::consts::PI * 6_371.0).abs() < 1e-6);
    }

    #[test]
    fn validate_rejects_out_of_range_coordinates() {
        assert!(Coordinate { lat: 91.0, lng: 0.0 }.validate().is_err());
        assert!(Coordinate {
            lat: 0.0,
            lng: -180.5
        }
        .validate()
        .is_err());
        assert!(GARAGE.validate().is_ok());
    }
}
