// SPDX-License-Identifier: MIT

//! Ride recorder state machine.
//!
//! States: `Idle` → `Recording` → `Idle`, no paused state, at most one
//! session active at a time. Location updates never append to the track;
//! they only refresh the current position. Points are added by explicit
//! user action, so distance accrues at tap granularity.

use crate::error::Result;
use crate::location::{LocationProvider, WatchOptions};
use crate::models::{Coordinate, RideSummary};
use crate::time_utils::{format_distance_km, format_elapsed};
use crate::track::{PlannedPath, Track};
use chrono::{DateTime, Utc};
use futures_util::StreamExt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Owns ride session state: consumes the location provider and user
/// actions, produces a running track and distance total, and on finish
/// hands off a [`RideSummary`].
pub struct RideRecorder<P: LocationProvider> {
    provider: Arc<P>,
    options: WatchOptions,
    position_tx: watch::Sender<Option<Coordinate>>,
    position_rx: watch::Receiver<Option<Coordinate>>,
    planned: PlannedPath,
    session: Option<ActiveSession>,
}

/// State held only while recording. Both session tasks (location pump and
/// elapsed ticker) hang off `cancel` and stop together.
struct ActiveSession {
    started_at: DateTime<Utc>,
    elapsed_secs: Arc<AtomicU64>,
    distance_meters: f64,
    track: Track,
    cancel: CancellationToken,
}

impl Drop for ActiveSession {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl<P: LocationProvider> RideRecorder<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self::with_options(provider, WatchOptions::default())
    }

    pub fn with_options(provider: Arc<P>, options: WatchOptions) -> Self {
        let (position_tx, position_rx) = watch::channel(None);
        Self {
            provider,
            options,
            position_tx,
            position_rx,
            planned: PlannedPath::default(),
            session: None,
        }
    }

    /// One-shot position fix used before any ride starts; seeds the
    /// current position so the first add-point has something to record.
    pub async fn initial_fix(&self) -> Result<Coordinate> {
        let fix = self.provider.current_position().await?;
        self.position_tx.send_replace(Some(fix));
        Ok(fix)
    }

    /// Start a ride session. No-op if one is already active.
    pub fn start(&mut self) -> Result<()> {
        if self.session.is_some() {
            tracing::debug!("start ignored: ride already in progress");
            return Ok(());
        }

        let mut stream = self.provider.watch(self.options.clone())?;
        let cancel = CancellationToken::new();
        let elapsed_secs = Arc::new(AtomicU64::new(0));
        let started_at = Utc::now();

        // Location pump: updates the current position only.
        let position_tx = self.position_tx.clone();
        let pump_cancel = cancel.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = pump_cancel.cancelled() => break,
                    fix = stream.next() => match fix {
                        Some(fix) => {
                            tracing::trace!(lat = fix.latitude, lon = fix.longitude, "position update");
                            position_tx.send_replace(Some(fix));
                        }
                        None => break,
                    },
                }
            }
        });

        // Elapsed ticker: recomputes now - start once per second.
        let ticker_elapsed = elapsed_secs.clone();
        let ticker_cancel = cancel.clone();
        tokio::spawn(async move {
            let start = tokio::time::Instant::now();
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            interval.tick().await; // first tick completes immediately
            loop {
                tokio::select! {
                    _ = ticker_cancel.cancelled() => break,
                    _ = interval.tick() => {
                        ticker_elapsed.store(start.elapsed().as_secs(), Ordering::Relaxed);
                    }
                }
            }
        });

        self.session = Some(ActiveSession {
            started_at,
            elapsed_secs,
            distance_meters: 0.0,
            track: Track::new(),
            cancel,
        });

        tracing::info!(started_at = %started_at, "ride started");
        Ok(())
    }

    /// Append the current position to the track. User-triggered only;
    /// no-op when idle or before the first fix is known.
    pub fn add_point(&mut self) {
        let Some(session) = self.session.as_mut() else {
            tracing::debug!("add_point ignored: no active ride");
            return;
        };
        let Some(position) = *self.position_rx.borrow() else {
            tracing::debug!("add_point ignored: no position fix yet");
            return;
        };

        let added = session.track.push(position);
        session.distance_meters += added;
        tracing::debug!(
            points = session.track.len(),
            added_meters = added,
            total_meters = session.distance_meters,
            "point added"
        );
    }

    /// Finish the ride: stop the session tasks and hand off the summary.
    /// Returns `None` (and does nothing) if no ride is active.
    pub fn finish(&mut self) -> Option<RideSummary> {
        let mut session = self.session.take()?;
        session.cancel.cancel();

        let elapsed = session.elapsed_secs.load(Ordering::Relaxed);
        let summary = RideSummary {
            total_time: format_elapsed(elapsed),
            distance_km: format_distance_km(session.distance_meters),
            point_count: session.track.len(),
            track: std::mem::take(&mut session.track).into_coords(),
            planned_path: self.planned.coords().to_vec(),
        };

        tracing::info!(
            total_time = %summary.total_time,
            distance_km = %summary.distance_km,
            points = summary.point_count,
            "ride finished"
        );
        Some(summary)
    }

    /// Replace the planned path wholesale (directions lookups are
    /// fire-and-forget with respect to the recorder).
    pub fn set_planned_path(&mut self, path: PlannedPath) {
        self.planned = path;
    }

    pub fn clear_planned_path(&mut self) {
        self.planned.clear();
    }

    pub fn planned_path(&self) -> &PlannedPath {
        &self.planned
    }

    pub fn is_recording(&self) -> bool {
        self.session.is_some()
    }

    /// Start timestamp of the active session, if any.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.session.as_ref().map(|s| s.started_at)
    }

    /// Elapsed seconds, recomputed once per second by the session ticker.
    pub fn elapsed_secs(&self) -> u64 {
        self.session
            .as_ref()
            .map(|s| s.elapsed_secs.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Cumulative distance over explicitly added points, in meters.
    pub fn distance_meters(&self) -> f64 {
        self.session
            .as_ref()
            .map(|s| s.distance_meters)
            .unwrap_or(0.0)
    }

    pub fn track(&self) -> &[Coordinate] {
        self.session
            .as_ref()
            .map(|s| s.track.coords())
            .unwrap_or(&[])
    }

    /// Last known position, live-updated while recording.
    pub fn current_position(&self) -> Option<Coordinate> {
        *self.position_rx.borrow()
    }

    /// Subscribe to current-position changes (map re-centering and the
    /// like). Independent of the recorded track.
    pub fn position_updates(&self) -> watch::Receiver<Option<Coordinate>> {
        self.position_rx.clone()
    }
}
