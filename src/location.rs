// SPDX-License-Identifier: MIT

//! Location provider abstraction.
//!
//! A provider yields a one-shot current position or an ongoing stream of
//! fixes at a caller-specified minimum time/distance interval. Dropping the
//! stream stops it.

use crate::error::{AppError, Result};
use crate::models::Coordinate;
use futures_util::Stream;
use std::path::Path;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::sync::mpsc;

/// Minimum thresholds between emitted fixes; a fix is delivered once either
/// threshold is reached.
#[derive(Debug, Clone)]
pub struct WatchOptions {
    pub min_interval: Duration,
    pub min_distance_meters: f64,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_secs(1),
            min_distance_meters: 1.0,
        }
    }
}

/// Ongoing stream of position fixes. Dropping the stream unsubscribes.
pub struct PositionStream {
    rx: mpsc::Receiver<Coordinate>,
}

impl PositionStream {
    pub fn new(rx: mpsc::Receiver<Coordinate>) -> Self {
        Self { rx }
    }

    /// Next fix, or `None` once the provider stops producing.
    pub async fn next_fix(&mut self) -> Option<Coordinate> {
        self.rx.recv().await
    }
}

impl Stream for PositionStream {
    type Item = Coordinate;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Coordinate>> {
        self.rx.poll_recv(cx)
    }
}

/// Source of position fixes.
#[allow(async_fn_in_trait)]
pub trait LocationProvider: Send + Sync + 'static {
    /// One-shot current position. Fails with
    /// [`AppError::PermissionDenied`] when location access is not granted.
    async fn current_position(&self) -> Result<Coordinate>;

    /// Subscribe to position updates filtered by `options`.
    fn watch(&self, options: WatchOptions) -> Result<PositionStream>;
}

/// Plays back a recorded list of fixes at a fixed tick. Used by the replay
/// binary and by tests that do not need fine-grained control.
pub struct ReplayProvider {
    fixes: Vec<Coordinate>,
    tick: Duration,
}

impl ReplayProvider {
    pub fn new(fixes: Vec<Coordinate>, tick: Duration) -> Self {
        Self { fixes, tick }
    }

    /// Load fixes from a JSON file containing a coordinate array.
    pub fn from_file(path: impl AsRef<Path>, tick: Duration) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())
            .map_err(|e| AppError::Location(format!("failed to read replay file: {}", e)))?;
        let fixes: Vec<Coordinate> = serde_json::from_str(&data)
            .map_err(|e| AppError::Location(format!("invalid replay file: {}", e)))?;
        Ok(Self::new(fixes, tick))
    }

    pub fn fixes(&self) -> &[Coordinate] {
        &self.fixes
    }

    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }
}

impl LocationProvider for ReplayProvider {
    async fn current_position(&self) -> Result<Coordinate> {
        self.fixes
            .first()
            .copied()
            .ok_or_else(|| AppError::Location("replay contains no fixes".to_string()))
    }

    fn watch(&self, options: WatchOptions) -> Result<PositionStream> {
        let (tx, rx) = mpsc::channel(16);
        let fixes = self.fixes.clone();
        let tick = self.tick;

        tokio::spawn(async move {
            let mut last_emit: Option<(Coordinate, tokio::time::Instant)> = None;
            for fix in fixes {
                tokio::time::sleep(tick).await;

                if let Some((last_fix, at)) = last_emit {
                    let far_enough =
                        last_fix.distance_meters(fix) >= options.min_distance_meters;
                    let long_enough = at.elapsed() >= options.min_interval;
                    if !far_enough && !long_enough {
                        continue;
                    }
                }

                if tx.send(fix).await.is_err() {
                    // Subscriber dropped the stream
                    return;
                }
                last_emit = Some((fix, tokio::time::Instant::now()));
            }
            tracing::debug!("replay exhausted");
        });

        Ok(PositionStream::new(rx))
    }
}
