//! Turn-by-turn navigation progress tracking.
//!
//! One tracker owns at most one [`NavigationSession`]. The session
//! advances through the route's maneuver steps as live positions come
//! within the turn-advance threshold of the current step's end, and
//! reaches `Completed` when the final step's end is reached. Position
//! updates and `stop` may arrive from different threads; the session is
//! kept behind a mutex so processing is serialized.

use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use crate::coord::Coordinate;
use crate::haversine::{self, EARTH_RADIUS_KM};
use crate::route::Route;
use crate::traits::{PositionSource, PositionSubscription, WatchOptions};

/// Proximity below which the current maneuver counts as reached, in
/// kilometers.
const DEFAULT_TURN_ADVANCE_THRESHOLD_KM: f64 = 0.05;

#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub turn_advance_threshold_km: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            turn_advance_threshold_km: DEFAULT_TURN_ADVANCE_THRESHOLD_KM,
        }
    }
}

/// How a session will track progress, decided at start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartMode {
    /// The route has maneuver steps; proximity advances them.
    TurnByTurn,
    /// The route has geometry but no steps (overview or degraded
    /// route). Positions are tracked, steps never advance.
    PathOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent {
    /// The session moved on to the step at `step_index`.
    StepAdvanced { step_index: usize },
    /// The final step's end was reached; the session is terminal.
    Completed,
}

/// Per-update snapshot handed to the presentation layer.
///
/// Distances are raw kilometers; formatting is the caller's concern
/// (see [`crate::units::format_turn_distance_km`]).
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    /// Index of the current maneuver step; `None` in path-only mode.
    pub current_step_index: Option<usize>,
    /// Distance from the last position to the current step's end, in
    /// kilometers. `None` in path-only mode.
    pub distance_to_step_end_km: Option<f64>,
    pub is_active: bool,
    pub is_completed: bool,
    pub event: Option<ProgressEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Active,
    Completed,
    Cancelled,
}

/// Mutable per-trip state. Owned exclusively by the tracker.
struct NavigationSession {
    route: Arc<Route>,
    current_step: usize,
    last_position: Option<Coordinate>,
    distance_to_step_end_km: Option<f64>,
    phase: Phase,
}

/// The progress tracker state machine: `Idle` (no session) → `Active` →
/// `Completed` or `Cancelled`.
pub struct NavigationTracker {
    config: TrackerConfig,
    session: Mutex<Option<NavigationSession>>,
    subscription: Mutex<Option<Box<dyn PositionSubscription>>>,
}

impl Default for NavigationTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl NavigationTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            session: Mutex::new(None),
            subscription: Mutex::new(None),
        }
    }

    /// Starts a session over `route`. A still-active session is
    /// cancelled and replaced.
    pub fn start(&self, route: Arc<Route>) -> StartMode {
        let mode = if route.has_steps() {
            StartMode::TurnByTurn
        } else {
            StartMode::PathOnly
        };

        let mut guard = self.session.lock().unwrap();
        if let Some(session) = guard.as_mut() {
            if session.phase == Phase::Active {
                info!("restarting: cancelling previous session");
                session.phase = Phase::Cancelled;
            }
        }
        *guard = Some(NavigationSession {
            route,
            current_step: 0,
            last_position: None,
            distance_to_step_end_km: None,
            phase: Phase::Active,
        });
        info!(?mode, "navigation session started");

        mode
    }

    /// Subscribes the tracker to a position source; the subscription is
    /// released on `stop` or completion.
    pub fn attach(self: &Arc<Self>, source: &dyn PositionSource, options: &WatchOptions) {
        let tracker = Arc::clone(self);
        let handle = source.subscribe(
            options,
            Box::new(move |position| {
                tracker.on_position_update(position);
            }),
        );
        *self.subscription.lock().unwrap() = Some(handle);
    }

    /// Applies one position update.
    ///
    /// Returns `None` when there is no active session: updates racing
    /// with teardown or arriving after completion are silently ignored.
    /// At most one step advances per update, however close the position
    /// is to later steps.
    pub fn on_position_update(&self, position: Coordinate) -> Option<ProgressUpdate> {
        let mut guard = self.session.lock().unwrap();
        let session = guard.as_mut()?;
        if session.phase != Phase::Active {
            return None;
        }

        session.last_position = Some(position);

        if session.route.steps.is_empty() {
            return Some(ProgressUpdate {
                current_step_index: None,
                distance_to_step_end_km: None,
                is_active: true,
                is_completed: false,
                event: None,
            });
        }

        let step_end = session.route.steps[session.current_step].end_location;
        let distance_km = haversine::distance(position, step_end, EARTH_RADIUS_KM);
        session.distance_to_step_end_km = Some(distance_km);

        let mut event = None;
        if distance_km < self.config.turn_advance_threshold_km {
            if session.current_step < session.route.steps.len() - 1 {
                session.current_step += 1;
                event = Some(ProgressEvent::StepAdvanced {
                    step_index: session.current_step,
                });
                debug!(step = session.current_step, "advanced to next maneuver");
            } else {
                session.phase = Phase::Completed;
                event = Some(ProgressEvent::Completed);
                info!("destination reached, session completed");
            }
        }

        let update = ProgressUpdate {
            current_step_index: Some(session.current_step),
            distance_to_step_end_km: Some(distance_km),
            is_active: session.phase == Phase::Active,
            is_completed: session.phase == Phase::Completed,
            event,
        };

        let completed = session.phase == Phase::Completed;
        drop(guard);
        if completed {
            self.release_subscription();
        }

        Some(update)
    }

    /// Cancels the active session and releases the position
    /// subscription. Safe to call from any thread, any number of times.
    pub fn stop(&self) {
        {
            let mut guard = self.session.lock().unwrap();
            if let Some(session) = guard.as_mut() {
                if session.phase == Phase::Active {
                    session.phase = Phase::Cancelled;
                    info!("navigation session cancelled");
                }
            }
        }
        self.release_subscription();
    }

    pub fn is_active(&self) -> bool {
        self.with_session(|session| session.phase == Phase::Active)
            .unwrap_or(false)
    }

    pub fn is_completed(&self) -> bool {
        self.with_session(|session| session.phase == Phase::Completed)
            .unwrap_or(false)
    }

    /// Current step index, when a turn-by-turn session exists.
    pub fn current_step_index(&self) -> Option<usize> {
        self.with_session(|session| {
            session.route.has_steps().then_some(session.current_step)
        })
        .flatten()
    }

    pub fn distance_to_step_end_km(&self) -> Option<f64> {
        self.with_session(|session| session.distance_to_step_end_km)
            .flatten()
    }

    pub fn last_position(&self) -> Option<Coordinate> {
        self.with_session(|session| session.last_position).flatten()
    }

    /// The route of the current session, shared read-only.
    pub fn route(&self) -> Option<Arc<Route>> {
        self.with_session(|session| Arc::clone(&session.route))
    }

    fn with_session<T>(&self, f: impl FnOnce(&NavigationSession) -> T) -> Option<T> {
        self.session.lock().unwrap().as_ref().map(f)
    }

    fn release_subscription(&self) {
        let handle = self.subscription.lock().unwrap().take();
        if let Some(mut handle) = handle {
            handle.cancel();
        }
    }
}
