// SPDX-License-Identifier: MIT

//! Application error types.
//!
//! Every failure is terminal from the caller's point of view: there is no
//! automatic retry anywhere in this crate. Errors are surfaced to the user
//! by the embedding layer and the action must be re-triggered manually.

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location provider error: {0}")]
    Location(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Authentication required")]
    Unauthorized,

    #[error("No route found between origin and destination")]
    NoRouteFound,

    #[error("Address not found")]
    AddressNotFound,

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Route must be saved before the ride")]
    RouteNotSaved,

    #[error("A request for this action is already in flight")]
    RequestInFlight,

    #[error("Polyline codec error: {0}")]
    Codec(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// True for "nothing matched" outcomes (no route, no address hit),
    /// which are notices to the user rather than failures.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, AppError::NoRouteFound | AppError::AddressNotFound)
    }
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AppError>;
