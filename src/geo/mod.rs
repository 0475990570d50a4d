// Geographic primitives shared by the nearest point search and the viewport fitter

pub mod bounds;
pub mod nearest;

use serde::{Deserialize, Serialize};

pub use bounds::{Viewport, compute_bounds};
pub use nearest::{NearestResult, nearest, nearest_by};

/// Mean earth radius used by the map library's `distanceTo`, in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A geographic coordinate in decimal degrees
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance in meters (haversine)
    pub fn distance_to(self, other: LatLng) -> f64 {
        haversine_distance(self, other)
    }
}

impl From<[f64; 2]> for LatLng {
    fn from(value: [f64; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

pub fn haversine_distance(a: LatLng, b: LatLng) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let sin_dlat = ((b.lat - a.lat).to_radians() / 2.0).sin();
    let sin_dlng = ((b.lng - a.lng).to_radians() / 2.0).sin();
    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlng * sin_dlng;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_self_is_zero() {
        let p = LatLng::new(55.75, 37.62);
        assert_eq!(p.distance_to(p), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = LatLng::new(55.75, 37.62);
        let b = LatLng::new(59.93, 30.31);
        assert!((a.distance_to(b) - b.distance_to(a)).abs() < 1e-6);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        // 2 * pi * R / 360
        let d = LatLng::new(10.0, 20.0).distance_to(LatLng::new(11.0, 20.0));
        assert!((d - 111_194.93).abs() < 0.1, "distance was {}", d);
    }

    #[test]
    fn test_known_city_distance() {
        // Moscow to Saint Petersburg is about 634 km
        let d = LatLng::new(55.7558, 37.6173).distance_to(LatLng::new(59.9343, 30.3351));
        assert!((d - 634_000.0).abs() < 5_000.0, "distance was {}", d);
    }

    #[test]
    fn test_latlng_from_array() {
        assert_eq!(LatLng::from([1.5, 2.5]), LatLng::new(1.5, 2.5));
    }
}
