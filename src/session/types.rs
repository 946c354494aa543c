//! Session state and result types.

use crate::destinations::StoreError;
use crate::health::HealthError;
use thiserror::Error;

/// Lifecycle state of a hike session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No start command received yet
    #[default]
    NotStarted,
    /// Ticking; elapsed time accumulating
    Running,
    /// Tick suspended; session can resume
    Paused,
    /// Summary written into the record but not yet persisted
    StoppedUnsaved,
    /// Persisted; terminal
    Finalized,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::NotStarted => write!(f, "not started"),
            SessionState::Running => write!(f, "running"),
            SessionState::Paused => write!(f, "paused"),
            SessionState::StoppedUnsaved => write!(f, "stopped (unsaved)"),
            SessionState::Finalized => write!(f, "finalized"),
        }
    }
}

/// Joined health metrics for one session window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetricsSnapshot {
    /// Step count
    pub steps: f64,
    /// Distance in meters
    pub distance_meters: f64,
    /// Active energy in kilocalories
    pub calories_kcal: f64,
    /// Average speed in km/h over the window
    pub avg_speed_kmh: f64,
}

/// Point-in-time view of a session, published to observers on every
/// mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionView {
    /// Current lifecycle state
    pub state: SessionState,
    /// Accumulated ticks in seconds
    pub elapsed_seconds: u64,
    /// Latest metrics snapshot, if one has been fetched
    pub live: Option<MetricsSnapshot>,
}

/// Errors from the session controller.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Command requires a session that has been started
    #[error("session has not been started")]
    NotStarted,

    /// Command arrived after the session was stopped or finalized
    #[error("session is already complete")]
    SessionComplete,

    /// Save requires a stopped, unsaved session
    #[error("session is not stopped; nothing to save")]
    NotStopped,

    /// The metrics join failed; the record was left untouched
    #[error("metrics snapshot failed: {0}")]
    Metrics(#[from] HealthError),

    /// Persisting the finished hike failed; save can be retried
    #[error("failed to save hike: {0}")]
    Store(#[from] StoreError),
}
