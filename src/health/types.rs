//! Health metric types shared by the provider contract and the session core.

use thiserror::Error;

/// A cumulative health metric the tracker reads from the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HealthMetric {
    /// Step count
    Steps,
    /// Walking/running distance in meters
    Distance,
    /// Active energy burned in kilocalories
    ActiveEnergy,
}

impl std::fmt::Display for HealthMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthMetric::Steps => write!(f, "steps"),
            HealthMetric::Distance => write!(f, "distance"),
            HealthMetric::ActiveEnergy => write!(f, "active energy"),
        }
    }
}

/// Joined totals of the three cumulative queries over one time window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindowTotals {
    /// Step count
    pub steps: f64,
    /// Distance in meters
    pub distance_meters: f64,
    /// Active energy in kilocalories
    pub active_energy_kcal: f64,
}

/// Activity since the start of the local day, for dashboard display.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TodayActivity {
    /// Step count
    pub steps: f64,
    /// Distance in meters
    pub distance_meters: f64,
    /// Active energy in kilocalories
    pub active_energy_kcal: f64,
    /// Average speed in km/h since the start of the day
    pub avg_speed_kmh: f64,
}

/// Errors from the health data provider.
///
/// A window with no samples is not an error; providers return `Ok(0.0)` for
/// it. Errors mean the query itself failed, e.g. revoked permission.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HealthError {
    /// The user declined (or revoked) health data access
    #[error("health data authorization was denied")]
    AuthorizationDenied,

    /// A cumulative query failed outright
    #[error("{metric} query failed: {reason}")]
    QueryFailed {
        /// Which of the three queries failed
        metric: HealthMetric,
        /// Provider-reported cause
        reason: String,
    },
}
