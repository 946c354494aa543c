//! Health metrics: provider contract, fan-out/fan-in aggregation, and
//! speed averaging.

pub mod provider;
pub mod types;

pub use provider::HealthMetricsProvider;
pub use types::{HealthError, HealthMetric, TodayActivity, WindowTotals};

use chrono::{DateTime, Local, NaiveTime, Utc};

/// Query all three cumulative metrics for `[start, end)` and join the
/// results.
///
/// The three queries run concurrently and every one of them resolves before
/// the aggregate is judged. Any failure fails the whole aggregate - partial
/// results are discarded, never returned - and the error names the first
/// failed metric in steps, distance, energy order, so a zero-sample success
/// is always distinguishable from a swallowed failure.
pub async fn window_totals<P: HealthMetricsProvider>(
    provider: &P,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<WindowTotals, HealthError> {
    let (steps, distance, energy) = tokio::join!(
        provider.cumulative(HealthMetric::Steps, start, end),
        provider.cumulative(HealthMetric::Distance, start, end),
        provider.cumulative(HealthMetric::ActiveEnergy, start, end),
    );

    let totals = WindowTotals {
        steps: steps?,
        distance_meters: distance?,
        active_energy_kcal: energy?,
    };
    tracing::debug!(
        steps = totals.steps,
        distance_meters = totals.distance_meters,
        active_energy_kcal = totals.active_energy_kcal,
        "joined metrics window"
    );
    Ok(totals)
}

/// Activity totals since the start of the local day, including average
/// speed over that window.
pub async fn today_activity<P: HealthMetricsProvider>(
    provider: &P,
) -> Result<TodayActivity, HealthError> {
    let now = Local::now();
    let day_start = start_of_local_day(now);

    let totals = window_totals(
        provider,
        day_start.with_timezone(&Utc),
        now.with_timezone(&Utc),
    )
    .await?;

    let window_seconds = (now - day_start).num_seconds() as f64;
    Ok(TodayActivity {
        steps: totals.steps,
        distance_meters: totals.distance_meters,
        active_energy_kcal: totals.active_energy_kcal,
        avg_speed_kmh: average_speed_kmh(totals.distance_meters, window_seconds),
    })
}

/// Average speed in km/h for a distance covered over a window.
///
/// A zero or negative window yields `0.0`.
pub fn average_speed_kmh(distance_meters: f64, window_seconds: f64) -> f64 {
    if window_seconds <= 0.0 {
        return 0.0;
    }
    (distance_meters / 1000.0) / (window_seconds / 3600.0)
}

/// Midnight of the day containing `now`, in the local time zone.
fn start_of_local_day(now: DateTime<Local>) -> DateTime<Local> {
    now.date_naive()
        .and_time(NaiveTime::MIN)
        .and_local_timezone(Local)
        // a DST gap at midnight has no unique local midnight
        .earliest()
        .unwrap_or(now)
}
