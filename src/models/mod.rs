// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod coordinate;
pub mod ride;
pub mod route;
pub mod user;

pub use coordinate::Coordinate;
pub use ride::{NewRide, RideSummary};
pub use route::{CreatedRoute, NewRoute, SavedRoute};
pub use user::UserProfile;
