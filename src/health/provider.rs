//! Health data provider contract.

use crate::health::types::{HealthError, HealthMetric};
use chrono::{DateTime, Utc};
use std::future::Future;

/// Source of cumulative health metrics, backed by the device health service.
///
/// Implementations wrap the platform health framework (or a fake in tests).
/// Queries are cumulative sums over `[start, end)`; a window with no samples
/// resolves to `Ok(0.0)` rather than an error.
pub trait HealthMetricsProvider: Send + Sync {
    /// Request read access to steps, distance and active energy.
    ///
    /// One-time grant; until it succeeds, queries resolve to zero data.
    fn authorize(&self) -> impl Future<Output = Result<(), HealthError>> + Send;

    /// Cumulative sum of one metric over `[start, end)`.
    fn cumulative(
        &self,
        metric: HealthMetric,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> impl Future<Output = Result<f64, HealthError>> + Send;
}
