// SPDX-License-Identifier: MIT

//! Services module - network-facing clients and flows.

pub mod backend;
pub mod directions;
pub mod geocoding;
pub mod summary;

pub use backend::ApiClient;
pub use directions::DirectionsClient;
pub use geocoding::GeocodingClient;
pub use summary::SummaryFlow;
