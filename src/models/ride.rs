// SPDX-License-Identifier: MIT

//! Ride models: the finish handoff and the persistence payload.

use crate::models::Coordinate;
use serde::{Deserialize, Serialize};

/// Summary handed off when a ride session finishes.
///
/// Field values are already formatted for display (`MM:SS` time, km with
/// two decimals); coordinate sequences travel as JSON arrays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RideSummary {
    /// Total time, formatted `MM:SS`
    #[serde(rename = "tempo")]
    pub total_time: String,
    /// Distance in kilometers with exactly two decimals
    #[serde(rename = "distancia")]
    pub distance_km: String,
    /// Number of recorded points
    #[serde(rename = "pontos")]
    pub point_count: usize,
    /// Full recorded track, in append order
    #[serde(rename = "rotaPercorrida")]
    pub track: Vec<Coordinate>,
    /// Full planned path at the time the ride finished
    #[serde(rename = "rotaPlanejada")]
    pub planned_path: Vec<Coordinate>,
}

/// Body for `POST /pedaladas/criar/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewRide {
    /// Server-assigned id of the parent route
    #[serde(rename = "rota")]
    pub route_id: i64,
    #[serde(rename = "tempo_total")]
    pub total_time: String,
    #[serde(rename = "distancia_percorrida")]
    pub distance_km: String,
    #[serde(rename = "pontos_registrados")]
    pub point_count: usize,
    #[serde(rename = "caminho")]
    pub track: Vec<Coordinate>,
}

impl NewRide {
    /// Build the persistence payload for a summary, bound to a saved route.
    pub fn from_summary(route_id: i64, summary: &RideSummary) -> Self {
        Self {
            route_id,
            total_time: summary.total_time.clone(),
            distance_km: summary.distance_km.clone(),
            point_count: summary.point_count,
            track: summary.track.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ride_wire_names() {
        let summary = RideSummary {
            total_time: "01:05".to_string(),
            distance_km: "0.42".to_string(),
            point_count: 3,
            track: vec![Coordinate::new(-23.55, -46.63)],
            planned_path: vec![],
        };
        let ride = NewRide::from_summary(17, &summary);
        let value = serde_json::to_value(&ride).unwrap();

        assert_eq!(value["rota"], 17);
        assert_eq!(value["tempo_total"], "01:05");
        assert_eq!(value["distancia_percorrida"], "0.42");
        assert_eq!(value["pontos_registrados"], 3);
        assert_eq!(value["caminho"][0]["longitude"], -46.63);
    }
}
