//! Integration tests for the full session-to-store flow.

use crate::health_mock::MockHealthProvider;
use chrono::{Duration, TimeZone, Utc};
use std::sync::{Arc, Mutex};
use trailtrek::destinations::{DestinationStore, NewDestination};
use trailtrek::health::{HealthMetric, HealthMetricsProvider};
use trailtrek::session::{HikeSessionController, SessionState, Ticker};
use trailtrek::storage::Database;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();
}

#[tokio::test]
async fn test_full_hike_flow_persists_summary() {
    init_tracing();

    let mut db = Database::open_in_memory().unwrap();
    let destination = db
        .create(NewDestination {
            name: "Eagle Peak".to_string(),
            ..NewDestination::sample()
        })
        .unwrap();
    let id = destination.id;

    let provider = MockHealthProvider::with_totals(10_000.0, 8_000.0, 500.0);
    provider.authorize().await.unwrap();

    let mut controller = HikeSessionController::new(destination, provider.clone(), db);

    let t0 = Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap();
    controller.start_at(t0).unwrap();
    for _ in 0..3661 {
        controller.tick();
    }
    controller
        .pause_at(t0 + Duration::seconds(1800))
        .await
        .unwrap();
    controller
        .start_at(t0 + Duration::seconds(2000))
        .unwrap();

    let stop_time = t0 + Duration::seconds(3661);
    controller.stop_at(stop_time).await.unwrap();
    controller.save().unwrap();
    assert_eq!(controller.state(), SessionState::Finalized);

    let (record, provider, db) = controller.into_parts();

    // the persisted row matches the in-memory record exactly
    let persisted = db.get(id).unwrap().unwrap();
    assert_eq!(persisted, record);
    assert_eq!(persisted.start_time, Some(t0));
    assert_eq!(persisted.end_time, Some(stop_time));
    assert_eq!(persisted.total_time.as_deref(), Some("01:01:01"));
    assert_eq!(persisted.steps, 10_000.0);
    assert_eq!(persisted.distance_meters, 8_000.0);
    assert_eq!(persisted.calories_kcal, 500.0);
    assert!(persisted.is_finished);
    assert!((persisted.avg_speed_kmh - 28_800.0 / 3661.0).abs() < 1e-9);

    // the final join queried all three metrics over the session window
    let final_window: Vec<HealthMetric> = provider
        .queries()
        .into_iter()
        .filter(|(_, start, end)| *start == t0 && *end == stop_time)
        .map(|(metric, _, _)| metric)
        .collect();
    assert_eq!(final_window.len(), 3);
    for metric in [
        HealthMetric::Steps,
        HealthMetric::Distance,
        HealthMetric::ActiveEnergy,
    ] {
        assert!(final_window.contains(&metric), "missing {metric}");
    }
}

#[tokio::test(start_paused = true)]
async fn test_ticker_advances_elapsed_and_stops_on_pause() {
    init_tracing();

    let mut db = Database::open_in_memory().unwrap();
    let destination = db.create(NewDestination::sample()).unwrap();
    let provider = MockHealthProvider::with_totals(0.0, 0.0, 0.0);

    let mut controller = HikeSessionController::new(destination, provider, db);
    controller.start().unwrap();

    let shared = Arc::new(Mutex::new(controller));
    let ticker = Ticker::spawn(shared.clone());

    tokio::time::sleep(std::time::Duration::from_secs(5)).await;
    let elapsed = shared.lock().unwrap().elapsed_seconds();
    assert!((4..=6).contains(&elapsed), "elapsed was {elapsed}");

    {
        let mut controller = shared.lock().unwrap();
        controller.pause_at(Utc::now()).await.unwrap();
        assert_eq!(controller.state(), SessionState::Paused);
    }

    // the tick task notices the pause at its next firing and exits
    tokio::time::sleep(std::time::Duration::from_secs(3)).await;
    for _ in 0..10 {
        if ticker.is_finished() {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert!(ticker.is_finished());
    assert_eq!(shared.lock().unwrap().elapsed_seconds(), elapsed);
}

#[tokio::test]
async fn test_unauthorized_provider_yields_zero_metrics_not_failure() {
    let mut db = Database::open_in_memory().unwrap();
    let destination = db.create(NewDestination::sample()).unwrap();

    // authorize() never called: queries resolve to zero data
    let provider = MockHealthProvider::with_totals(10_000.0, 8_000.0, 500.0);

    let mut controller = HikeSessionController::new(destination, provider, db);
    let t0 = Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap();
    controller.start_at(t0).unwrap();
    controller.stop_at(t0 + Duration::seconds(600)).await.unwrap();
    controller.save().unwrap();

    let (record, _, _) = controller.into_parts();
    assert!(record.is_finished);
    assert_eq!(record.steps, 0.0);
    assert_eq!(record.distance_meters, 0.0);
    assert_eq!(record.avg_speed_kmh, 0.0);
}
