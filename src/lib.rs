// SPDX-License-Identifier: MIT

//! Ciclomapa: headless ride-tracking engine and API client.
//!
//! Records cycling rides from a stream of GPS fixes, plans routes against a
//! directions service, and persists routes and ride summaries to a remote
//! backend. The recorder accrues distance only on explicit add-point
//! actions; the live location stream just keeps the current position fresh.

pub mod config;
pub mod error;
pub mod location;
pub mod models;
pub mod recorder;
pub mod services;
pub mod session;
pub mod time_utils;
pub mod track;

pub use error::{AppError, Result};
pub use models::Coordinate;
pub use recorder::RideRecorder;
pub use session::AuthSession;
