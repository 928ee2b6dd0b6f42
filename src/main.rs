// SPDX-License-Identifier: MIT

//! Ciclomapa replay driver.
//!
//! Plays a recorded list of GPS fixes through a full ride session: plans a
//! path from the first to the last fix, records the ride (adding a point
//! per fix, as if the rider tapped at each one), prints the summary, and
//! optionally persists route + ride to the backend.
//!
//! Usage: `ciclomapa <replay.json> [route name]`

use ciclomapa::{
    config::Config,
    location::ReplayProvider,
    recorder::RideRecorder,
    services::{ApiClient, DirectionsClient, SummaryFlow},
    session::AuthSession,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = Config::from_env()?;
    let replay_path = std::env::args()
        .nth(1)
        .ok_or("usage: ciclomapa <replay.json> [route name]")?;

    let provider = Arc::new(ReplayProvider::from_file(
        &replay_path,
        Duration::from_millis(config.replay_tick_ms),
    )?);
    tracing::info!(path = %replay_path, fixes = provider.len(), "replay loaded");

    let mut recorder = RideRecorder::new(provider.clone());
    let origin = recorder.initial_fix().await?;

    // Plan a path from the first to the last fix. Fire-and-forget with
    // respect to the recording: any failure just leaves the path empty.
    if let Some(destination) = provider.fixes().last().copied().filter(|_| provider.len() >= 2) {
        let directions =
            DirectionsClient::new(&config.directions_base_url, &config.directions_api_key);
        match directions.bicycling_route(origin, destination).await {
            Ok(path) => {
                if let Some(rect) = path.bounds() {
                    tracing::info!(
                        south = rect.min().y,
                        west = rect.min().x,
                        north = rect.max().y,
                        east = rect.max().x,
                        points = path.len(),
                        "planned path set"
                    );
                }
                recorder.set_planned_path(path);
            }
            Err(e) if e.is_empty_result() => {
                tracing::warn!("no route found between first and last fix");
                recorder.clear_planned_path();
            }
            Err(e) => {
                tracing::warn!(error = %e, "directions lookup failed");
                recorder.clear_planned_path();
            }
        }
    }

    recorder.start()?;
    let mut updates = recorder.position_updates();

    // Tap once per delivered fix; stop when the replay goes quiet.
    let idle = Duration::from_millis(config.replay_tick_ms * 20 + 1000);
    loop {
        match tokio::time::timeout(idle, updates.changed()).await {
            Ok(Ok(())) => recorder.add_point(),
            _ => break,
        }
    }

    let summary = recorder.finish().expect("ride was started");
    println!("Tempo total:   {}", summary.total_time);
    println!("Distância:     {} km", summary.distance_km);
    println!("Pontos:        {}", summary.point_count);

    let Some(token) = config.api_token.clone() else {
        tracing::info!("no CICLOMAPA_TOKEN set, skipping persistence");
        return Ok(());
    };

    let session = AuthSession::with_token(token);
    let api = ApiClient::new(config.api_base_url.clone(), session);
    let flow = SummaryFlow::new(api, summary);

    let name = std::env::args()
        .nth(2)
        .unwrap_or_else(|| format!("Replay {}", chrono::Utc::now().format("%Y-%m-%d %H:%M")));
    let route_id = flow
        .save_route(&name, "Gravada a partir de um replay")
        .await?;
    flow.save_ride().await?;
    tracing::info!(route_id, "route and ride persisted");

    Ok(())
}

/// Initialize structured logging for the CLI.
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ciclomapa=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
