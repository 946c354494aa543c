//! Hike session controller: the start/pause/stop/save state machine.

use crate::destinations::{Destination, DestinationStore};
use crate::format;
use crate::health::{self, HealthError, HealthMetricsProvider};
use crate::session::types::{MetricsSnapshot, SessionError, SessionState, SessionView};
use chrono::{DateTime, Utc};
use tokio::sync::watch;

/// Drives one hike session against a single [`Destination`] record.
///
/// Commands move the session through `NotStarted -> Running <-> Paused ->
/// StoppedUnsaved -> Finalized`. The host schedules the 1-second tick (see
/// [`crate::session::Ticker`]) and issues commands from its UI loop; the
/// state machine itself guards against re-entry, so a repeated `stop()` or
/// `save()` is a no-op rather than a double write.
///
/// Collaborators are constructor-injected so the controller tests against
/// fakes: `P` supplies cumulative health metrics, `S` persists the record.
pub struct HikeSessionController<P, S> {
    provider: P,
    store: S,
    destination: Destination,
    state: SessionState,
    elapsed_seconds: u64,
    live: Option<MetricsSnapshot>,
    view_tx: watch::Sender<SessionView>,
}

impl<P, S> HikeSessionController<P, S>
where
    P: HealthMetricsProvider,
    S: DestinationStore,
{
    /// Create a controller for a destination.
    ///
    /// A record that is already finished starts (and stays) `Finalized`;
    /// every mutating command against it is rejected.
    pub fn new(destination: Destination, provider: P, store: S) -> Self {
        let state = if destination.is_finished {
            SessionState::Finalized
        } else {
            SessionState::NotStarted
        };
        let (view_tx, _) = watch::channel(SessionView {
            state,
            elapsed_seconds: 0,
            live: None,
        });

        Self {
            provider,
            store,
            destination,
            state,
            elapsed_seconds: 0,
            live: None,
            view_tx,
        }
    }

    /// Start or resume the session.
    ///
    /// The record's start time is set by the first start only; a resume
    /// leaves it untouched. A start while already `Running` is a no-op so
    /// the tick is never double-scheduled.
    pub fn start(&mut self) -> Result<(), SessionError> {
        self.start_at(Utc::now())
    }

    /// [`start`](Self::start) with an explicit timestamp.
    pub fn start_at(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        match self.state {
            SessionState::Running => Ok(()),
            SessionState::NotStarted | SessionState::Paused => {
                let resumed = self.destination.start_time.is_some();
                if !resumed {
                    self.destination.start_time = Some(now);
                }
                self.state = SessionState::Running;
                tracing::info!(destination = %self.destination.name, resumed, "hike running");
                self.publish();
                Ok(())
            }
            SessionState::StoppedUnsaved | SessionState::Finalized => {
                Err(SessionError::SessionComplete)
            }
        }
    }

    /// Advance the elapsed-time counter by one second.
    ///
    /// Called once per second by the host timer; ignored unless the session
    /// is `Running`. The counter is never reset within a session.
    pub fn tick(&mut self) {
        if self.state == SessionState::Running {
            self.elapsed_seconds += 1;
            self.publish();
        }
    }

    /// Pause the session and refresh the live metrics snapshot.
    ///
    /// The tick suspends immediately; the snapshot covers the window from
    /// the session start until now and does not finalize anything. A
    /// snapshot failure leaves the session `Paused` with the previous
    /// snapshot intact. Pausing while already `Paused` is a no-op.
    pub async fn pause(&mut self) -> Result<(), SessionError> {
        self.pause_at(Utc::now()).await
    }

    /// [`pause`](Self::pause) with an explicit timestamp.
    pub async fn pause_at(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        match self.state {
            SessionState::Paused => return Ok(()),
            SessionState::Running => {}
            SessionState::NotStarted => return Err(SessionError::NotStarted),
            SessionState::StoppedUnsaved | SessionState::Finalized => {
                return Err(SessionError::SessionComplete)
            }
        }

        let start = self.destination.start_time.ok_or(SessionError::NotStarted)?;
        self.state = SessionState::Paused;
        tracing::info!(elapsed_seconds = self.elapsed_seconds, "hike paused");
        self.publish();

        match self.snapshot(start, now).await {
            Ok(snapshot) => {
                self.live = Some(snapshot);
                self.publish();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "metrics refresh failed while pausing");
                Err(e.into())
            }
        }
    }

    /// Stop the session and write the summary into the record.
    ///
    /// Fetches the final metrics snapshot for the window from the session
    /// start until now, then writes end time, total time, and the four
    /// metric results together and marks the record finished - all or
    /// nothing. If the metrics join fails the record is left untouched and
    /// the session parks in `Paused` so the stop can be retried. Once the
    /// session is `StoppedUnsaved` or `Finalized`, further stops are no-ops.
    pub async fn stop(&mut self) -> Result<(), SessionError> {
        self.stop_at(Utc::now()).await
    }

    /// [`stop`](Self::stop) with an explicit timestamp.
    pub async fn stop_at(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        match self.state {
            SessionState::StoppedUnsaved | SessionState::Finalized => return Ok(()),
            SessionState::NotStarted => return Err(SessionError::NotStarted),
            SessionState::Running | SessionState::Paused => {}
        }

        let start = self.destination.start_time.ok_or(SessionError::NotStarted)?;
        // park the tick while the final join is in flight
        self.state = SessionState::Paused;

        let snapshot = match self.snapshot(start, now).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(error = %e, "final metrics join failed; hike left paused");
                self.publish();
                return Err(e.into());
            }
        };

        let total_time = format::format_elapsed(self.elapsed_seconds);
        let destination = &mut self.destination;
        destination.end_time = Some(now);
        destination.total_time = Some(total_time.clone());
        destination.steps = snapshot.steps;
        destination.distance_meters = snapshot.distance_meters;
        destination.calories_kcal = snapshot.calories_kcal;
        destination.avg_speed_kmh = snapshot.avg_speed_kmh;
        destination.is_finished = true;

        self.live = Some(snapshot);
        self.state = SessionState::StoppedUnsaved;
        tracing::info!(
            %total_time,
            steps = snapshot.steps,
            distance_meters = snapshot.distance_meters,
            "hike stopped"
        );
        self.publish();
        Ok(())
    }

    /// Persist the finished record.
    ///
    /// A store failure leaves the session `StoppedUnsaved` so the save can
    /// be retried. Saving an already-finalized session is a no-op.
    pub fn save(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Finalized => return Ok(()),
            SessionState::StoppedUnsaved => {}
            _ => return Err(SessionError::NotStopped),
        }

        self.store.update(&self.destination)?;
        self.state = SessionState::Finalized;
        tracing::info!(id = %self.destination.id, "hike saved");
        self.publish();
        Ok(())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the tick is currently accumulating.
    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// Accumulated ticks in seconds.
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// The record this session tracks, including any summary written so far.
    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    /// Latest metrics snapshot, if one has been fetched.
    pub fn live_metrics(&self) -> Option<&MetricsSnapshot> {
        self.live.as_ref()
    }

    /// Subscribe to session views; a fresh view is published after every
    /// mutation.
    pub fn subscribe(&self) -> watch::Receiver<SessionView> {
        self.view_tx.subscribe()
    }

    /// Tear the controller apart, recovering the record and collaborators.
    pub fn into_parts(self) -> (Destination, P, S) {
        (self.destination, self.provider, self.store)
    }

    /// Fetch and join the three metric queries for `[start, now)`.
    async fn snapshot(
        &self,
        start: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<MetricsSnapshot, HealthError> {
        let totals = health::window_totals(&self.provider, start, now).await?;
        let window_seconds = (now - start).num_seconds() as f64;
        Ok(MetricsSnapshot {
            steps: totals.steps,
            distance_meters: totals.distance_meters,
            calories_kcal: totals.active_energy_kcal,
            avg_speed_kmh: health::average_speed_kmh(totals.distance_meters, window_seconds),
        })
    }

    fn publish(&self) {
        self.view_tx.send_replace(SessionView {
            state: self.state,
            elapsed_seconds: self.elapsed_seconds,
            live: self.live,
        });
    }
}
