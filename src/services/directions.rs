// SPDX-License-Identifier: MIT

//! Directions lookup: origin + destination in bicycling mode → planned path.
//!
//! Zero candidate routes is a user-facing "no route found" notice, not a
//! transport failure; the caller clears the planned path in both cases.

use crate::error::{AppError, Result};
use crate::models::Coordinate;
use crate::track::PlannedPath;
use serde::Deserialize;

/// Client for a Google-Directions-shaped service.
#[derive(Clone)]
pub struct DirectionsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl DirectionsClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Request a bicycling route and decode the first candidate's
    /// overview polyline. Replaces any previous planned path wholesale.
    pub async fn bicycling_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<PlannedPath> {
        let url = format!("{}/json", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                (
                    "origin",
                    format!("{},{}", origin.latitude, origin.longitude),
                ),
                (
                    "destination",
                    format!("{},{}", destination.latitude, destination.longitude),
                ),
                ("key", self.api_key.clone()),
                ("mode", "bicycling".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Api { status, body });
        }

        let body: DirectionsResponse = response
            .json()
            .await
            .map_err(|e| AppError::Network(format!("JSON parse error: {}", e)))?;

        planned_path_from_response(body)
    }
}

/// Directions service response; only the overview polylines are used.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    overview_polyline: OverviewPolyline,
}

#[derive(Debug, Deserialize)]
struct OverviewPolyline {
    points: String,
}

/// Decode the first candidate route into a planned path.
fn planned_path_from_response(response: DirectionsResponse) -> Result<PlannedPath> {
    let Some(route) = response.routes.first() else {
        tracing::info!("directions returned no routes");
        return Err(AppError::NoRouteFound);
    };
    PlannedPath::from_encoded(&route.overview_polyline.points)
}
