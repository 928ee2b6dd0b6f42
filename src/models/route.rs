// SPDX-License-Identifier: MIT

//! Route models for the persistence backend.
//!
//! Wire field names follow the backend API (`nome`, `descricao`,
//! `coordenadas`).

use crate::models::Coordinate;
use serde::{Deserialize, Deserializer, Serialize};

/// Body for `POST /rotas/criar/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewRoute {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "coordenadas")]
    pub coordinates: Vec<Coordinate>,
}

/// Response from `POST /rotas/criar/`. The id gates ride persistence.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CreatedRoute {
    pub id: i64,
}

/// A stored route returned by `GET /rotas/listar`.
#[derive(Debug, Clone, Deserialize)]
pub struct SavedRoute {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default)]
    pub description: String,
    #[serde(rename = "coordenadas", default, deserialize_with = "coordinate_list")]
    pub coordinates: Vec<Coordinate>,
}

/// The backend serializes decimal fields as JSON strings; accept both.
fn coordinate_list<'de, D>(deserializer: D) -> Result<Vec<Coordinate>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    impl NumberOrString {
        fn as_f64<E: serde::de::Error>(&self) -> Result<f64, E> {
            match self {
                NumberOrString::Number(n) => Ok(*n),
                NumberOrString::String(s) => s.parse().map_err(E::custom),
            }
        }
    }

    #[derive(Deserialize)]
    struct WireCoordinate {
        latitude: NumberOrString,
        longitude: NumberOrString,
    }

    let wire: Vec<WireCoordinate> = Vec::deserialize(deserializer)?;
    wire.into_iter()
        .map(|c| {
            Ok(Coordinate {
                latitude: c.latitude.as_f64()?,
                longitude: c.longitude.as_f64()?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_route_accepts_string_coordinates() {
        let json = serde_json::json!({
            "id": 3,
            "nome": "Volta ao parque",
            "descricao": "Ciclovia da marginal",
            "coordenadas": [
                { "latitude": "-23.550520", "longitude": "-46.633308" },
                { "latitude": -23.5512, "longitude": -46.6340 }
            ]
        });

        let route: SavedRoute = serde_json::from_value(json).unwrap();
        assert_eq!(route.id, 3);
        assert_eq!(route.coordinates.len(), 2);
        assert!((route.coordinates[0].latitude - -23.55052).abs() < 1e-9);
        assert_eq!(route.coordinates[1].longitude, -46.6340);
    }

    #[test]
    fn test_saved_route_coordinates_optional() {
        let json = serde_json::json!({ "id": 9, "nome": "Sem traçado" });
        let route: SavedRoute = serde_json::from_value(json).unwrap();
        assert!(route.coordinates.is_empty());
        assert!(route.description.is_empty());
    }

    #[test]
    fn test_new_route_wire_names() {
        let body = NewRoute {
            name: "Treino".to_string(),
            description: "Subida da serra".to_string(),
            coordinates: vec![Coordinate::new(-23.0, -46.0)],
        };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("nome").is_some());
        assert!(value.get("descricao").is_some());
        assert_eq!(value["coordenadas"][0]["latitude"], -23.0);
    }
}
