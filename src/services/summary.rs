// SPDX-License-Identifier: MIT

//! Two-phase ride persistence: save the route first, then the ride.
//!
//! The route id returned by phase 1 is a hard precondition for phase 2.
//! There is no rollback: a saved route persists even if the ride save is
//! never completed. Each logical action carries an in-flight guard so a
//! double trigger cannot double-submit.

use crate::error::{AppError, Result};
use crate::models::{NewRide, NewRoute, RideSummary};
use crate::services::ApiClient;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::{Mutex, OwnedMutexGuard};

const SAVE_ROUTE: &str = "save_route";
const SAVE_RIDE: &str = "save_ride";

/// Drives the post-ride persistence flow for one handed-off summary.
pub struct SummaryFlow {
    api: ApiClient,
    summary: RideSummary,
    route_id: RwLock<Option<i64>>,
    ride_saved: AtomicBool,
    in_flight: DashMap<&'static str, Arc<Mutex<()>>>,
}

impl SummaryFlow {
    pub fn new(api: ApiClient, summary: RideSummary) -> Self {
        Self {
            api,
            summary,
            route_id: RwLock::new(None),
            ride_saved: AtomicBool::new(false),
            in_flight: DashMap::new(),
        }
    }

    pub fn summary(&self) -> &RideSummary {
        &self.summary
    }

    /// Server id of the saved route, once phase 1 has completed.
    pub fn route_id(&self) -> Option<i64> {
        *self.route_id.read().expect("route_id lock poisoned")
    }

    /// Whether phase 2 has completed at least once.
    pub fn ride_saved(&self) -> bool {
        self.ride_saved.load(Ordering::Relaxed)
    }

    /// Whether the ride can be saved (a route id exists).
    pub fn can_save_ride(&self) -> bool {
        self.route_id().is_some()
    }

    /// Phase 1: persist the planned path as a named route.
    ///
    /// On failure nothing changes and the same form may be retried.
    pub async fn save_route(&self, name: &str, description: &str) -> Result<i64> {
        if name.trim().is_empty() {
            return Err(AppError::Validation("route name is required".to_string()));
        }
        if description.trim().is_empty() {
            return Err(AppError::Validation(
                "route description is required".to_string(),
            ));
        }

        let _guard = self.guard(SAVE_ROUTE)?;

        let route = NewRoute {
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            coordinates: self.summary.planned_path.clone(),
        };
        let created = self.api.create_route(&route).await?;

        *self.route_id.write().expect("route_id lock poisoned") = Some(created.id);
        tracing::info!(route_id = created.id, "route saved, ride save unlocked");
        Ok(created.id)
    }

    /// Phase 2: persist the ride. Gated on a saved route; without one this
    /// performs no network call and returns [`AppError::RouteNotSaved`].
    ///
    /// Idempotency is not enforced: calling again after success re-submits.
    pub async fn save_ride(&self) -> Result<()> {
        let Some(route_id) = self.route_id() else {
            tracing::warn!("save_ride rejected: route not saved yet");
            return Err(AppError::RouteNotSaved);
        };

        let _guard = self.guard(SAVE_RIDE)?;

        let ride = NewRide::from_summary(route_id, &self.summary);
        self.api.create_ride(&ride).await?;

        self.ride_saved.store(true, Ordering::Relaxed);
        tracing::info!(route_id, "ride saved");
        Ok(())
    }

    /// One outstanding request per logical action; a second concurrent
    /// trigger gets `RequestInFlight` instead of double-submitting.
    fn guard(&self, action: &'static str) -> Result<OwnedMutexGuard<()>> {
        let lock = self
            .in_flight
            .entry(action)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.try_lock_owned().map_err(|_| AppError::RequestInFlight)
    }
}
