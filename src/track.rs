// SPDX-License-Identifier: MIT

//! Recorded tracks, planned paths, and the encoded-polyline codec.

use crate::error::{AppError, Result};
use crate::models::Coordinate;
use geo::{coord, BoundingRect, Coord, LineString, Rect};

/// Encoded polylines use precision 5 (1e-5 degrees per unit).
const POLYLINE_PRECISION: u32 = 5;

/// Append-only coordinate sequence owned by an active ride session.
///
/// Cleared and restarted when a new ride begins; mutated only by the
/// add-point action.
#[derive(Debug, Clone, Default)]
pub struct Track(Vec<Coordinate>);

impl Track {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point, returning the geodesic distance in meters from the
    /// previous last point (0.0 when the track was empty).
    pub fn push(&mut self, point: Coordinate) -> f64 {
        let added = match self.0.last() {
            Some(last) => last.distance_meters(point),
            None => 0.0,
        };
        self.0.push(point);
        added
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn coords(&self) -> &[Coordinate] {
        &self.0
    }

    pub fn last(&self) -> Option<Coordinate> {
        self.0.last().copied()
    }

    pub fn into_coords(self) -> Vec<Coordinate> {
        self.0
    }
}

/// Coordinates returned by a directions lookup. Display/reference only;
/// replaced wholesale on each new request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlannedPath(Vec<Coordinate>);

impl PlannedPath {
    pub fn new(coords: Vec<Coordinate>) -> Self {
        Self(coords)
    }

    /// Decode from an encoded polyline string.
    pub fn from_encoded(encoded: &str) -> Result<Self> {
        Ok(Self(decode_path(encoded)?))
    }

    pub fn coords(&self) -> &[Coordinate] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Bounding rectangle of the path, used to re-fit a map viewport.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        if self.0.is_empty() {
            return None;
        }
        LineString::from(
            self.0
                .iter()
                .map(|c| coord! { x: c.longitude, y: c.latitude })
                .collect::<Vec<Coord<f64>>>(),
        )
        .bounding_rect()
    }
}

/// Decode an encoded polyline into a coordinate sequence.
pub fn decode_path(encoded: &str) -> Result<Vec<Coordinate>> {
    let line = polyline::decode_polyline(encoded, POLYLINE_PRECISION)
        .map_err(|e| AppError::Codec(e.to_string()))?;
    Ok(line
        .coords()
        .map(|c| Coordinate::new(c.y, c.x))
        .collect())
}

/// Encode a coordinate sequence as a polyline string.
pub fn encode_path(coords: &[Coordinate]) -> Result<String> {
    let line: Vec<Coord<f64>> = coords
        .iter()
        .map(|c| coord! { x: c.longitude, y: c.latitude })
        .collect();
    polyline::encode_coordinates(line, POLYLINE_PRECISION)
        .map_err(|e| AppError::Codec(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_coords() -> Vec<Coordinate> {
        vec![
            Coordinate::new(-23.55052, -46.63331),
            Coordinate::new(-23.55120, -46.63400),
            Coordinate::new(-23.55300, -46.63510),
        ]
    }

    #[test]
    fn test_track_distance_accumulates_pairwise() {
        let coords = sample_coords();
        let mut track = Track::new();
        let mut total = 0.0;
        for c in &coords {
            total += track.push(*c);
        }

        let expected: f64 = coords
            .windows(2)
            .map(|w| w[0].distance_meters(w[1]))
            .sum();
        assert!((total - expected).abs() < 1e-9);
        assert_eq!(track.len(), 3);
    }

    #[test]
    fn test_first_point_adds_no_distance() {
        let mut track = Track::new();
        assert_eq!(track.push(Coordinate::new(-23.55, -46.63)), 0.0);
    }

    #[test]
    fn test_polyline_round_trip_within_precision() {
        let coords = sample_coords();
        let encoded = encode_path(&coords).unwrap();
        let decoded = decode_path(&encoded).unwrap();

        assert_eq!(decoded.len(), coords.len());
        for (orig, round) in coords.iter().zip(&decoded) {
            assert!((orig.latitude - round.latitude).abs() < 1e-5);
            assert!((orig.longitude - round.longitude).abs() < 1e-5);
        }
    }

    #[test]
    fn test_decode_invalid_polyline_is_error() {
        assert!(decode_path("invalid!!!").is_err());
    }

    #[test]
    fn test_planned_path_bounds() {
        let path = PlannedPath::new(sample_coords());
        let rect = path.bounds().expect("non-empty path has bounds");
        assert_eq!(rect.min().y, -23.55300);
        assert_eq!(rect.max().y, -23.55052);
        assert_eq!(rect.min().x, -46.63510);
        assert_eq!(rect.max().x, -46.63331);

        assert!(PlannedPath::default().bounds().is_none());
    }
}
