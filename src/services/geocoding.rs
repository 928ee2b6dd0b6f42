// SPDX-License-Identifier: MIT

//! Free-text address resolution via a Nominatim-shaped geocoding service.

use crate::error::{AppError, Result};
use crate::models::Coordinate;
use serde::Deserialize;

/// Geocoding client. The first hit wins.
#[derive(Clone)]
pub struct GeocodingClient {
    http: reqwest::Client,
    base_url: String,
}

impl GeocodingClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Resolve a free-text address to a coordinate.
    pub async fn resolve(&self, address: &str) -> Result<Coordinate> {
        let url = format!(
            "{}/search?format=json&q={}",
            self.base_url,
            urlencoding::encode(address)
        );
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Api { status, body });
        }

        let places: Vec<Place> = response
            .json()
            .await
            .map_err(|e| AppError::Network(format!("JSON parse error: {}", e)))?;

        coordinate_from_places(&places)
    }
}

/// One geocoding hit; lat/lon arrive as strings.
#[derive(Debug, Deserialize)]
pub struct Place {
    lat: String,
    lon: String,
}

fn coordinate_from_places(places: &[Place]) -> Result<Coordinate> {
    let Some(place) = places.first() else {
        tracing::info!("geocoding returned no results");
        return Err(AppError::AddressNotFound);
    };

    let latitude: f64 = place
        .lat
        .parse()
        .map_err(|_| AppError::Network(format!("invalid latitude: {}", place.lat)))?;
    let longitude: f64 = place
        .lon
        .parse()
        .map_err(|_| AppError::Network(format!("invalid longitude: {}", place.lon)))?;

    Ok(Coordinate::new(latitude, longitude))
}
