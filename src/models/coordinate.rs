// SPDX-License-Identifier: MIT

//! Coordinate value type.

use geo::{Distance, Haversine, Point};
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair. Immutable value type; no validation is
/// performed beyond what the location provider supplies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to another coordinate, in meters.
    pub fn distance_meters(self, other: Coordinate) -> f64 {
        Haversine.distance(Point::from(self), Point::from(other))
    }
}

impl From<Coordinate> for Point<f64> {
    fn from(c: Coordinate) -> Self {
        Point::new(c.longitude, c.latitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_symmetric() {
        let a = Coordinate::new(-23.5505, -46.6333); // São Paulo
        let b = Coordinate::new(-22.9068, -43.1729); // Rio de Janeiro
        let d = a.distance_meters(b);

        assert!((d - b.distance_meters(a)).abs() < 1e-6);
        // Roughly 360 km as the crow flies
        assert!(d > 350_000.0 && d < 370_000.0, "got {}", d);
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let a = Coordinate::new(-23.5505, -46.6333);
        assert_eq!(a.distance_meters(a), 0.0);
    }
}
