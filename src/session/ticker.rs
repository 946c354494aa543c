//! One-second tick task for a running session.

use crate::destinations::DestinationStore;
use crate::health::HealthMetricsProvider;
use crate::session::controller::HikeSessionController;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Background task firing [`HikeSessionController::tick`] once per second.
///
/// The task exits on its own as soon as the session leaves `Running`, so a
/// pause or stop cancels the tick without bookkeeping; spawn a fresh ticker
/// after each transition into `Running`. Dropping the handle aborts the
/// task, covering controller teardown mid-session.
pub struct Ticker {
    handle: tokio::task::JoinHandle<()>,
}

impl Ticker {
    /// Spawn the tick task for a shared controller.
    pub fn spawn<P, S>(controller: Arc<Mutex<HikeSessionController<P, S>>>) -> Self
    where
        P: HealthMetricsProvider + Send + 'static,
        S: DestinationStore + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the first tick resolves immediately; the session starts at zero
            interval.tick().await;

            loop {
                interval.tick().await;
                let mut controller = match controller.lock() {
                    Ok(controller) => controller,
                    Err(_) => break,
                };
                if !controller.is_running() {
                    break;
                }
                controller.tick();
            }
            tracing::debug!("session ticker stopped");
        });

        Self { handle }
    }

    /// Abort the tick task.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Whether the tick task has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
