//! Collaborator interfaces for the navigation core.
//!
//! These are intentionally minimal. The hosting app supplies the
//! concrete implementations (HTTP directions client, platform location
//! services); tests supply mocks.

use std::fmt;

use crate::coord::Coordinate;
use crate::directions_data::DirectionsResponse;

/// A directions request: where the trip starts and ends, plus optional
/// intermediate stops.
#[derive(Debug, Clone)]
pub struct DirectionsRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub waypoints: Vec<Coordinate>,
}

impl DirectionsRequest {
    pub fn new(origin: Coordinate, destination: Coordinate) -> Self {
        Self {
            origin,
            destination,
            waypoints: Vec::new(),
        }
    }

    pub fn with_waypoints(mut self, waypoints: Vec<Coordinate>) -> Self {
        self.waypoints = waypoints;
        self
    }
}

/// Failure talking to the directions service.
///
/// Transport failures and non-OK payload statuses are handled alike at
/// the assembly boundary: the route degrades to a straight line rather
/// than blocking navigation.
#[derive(Debug)]
pub enum DirectionsError {
    Http(reqwest::Error),
    Status(String),
}

impl fmt::Display for DirectionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectionsError::Http(err) => write!(f, "directions request failed: {}", err),
            DirectionsError::Status(status) => {
                write!(f, "directions service returned status {}", status)
            }
        }
    }
}

impl std::error::Error for DirectionsError {}

impl From<reqwest::Error> for DirectionsError {
    fn from(err: reqwest::Error) -> Self {
        DirectionsError::Http(err)
    }
}

/// External service that resolves a request into raw multi-leg
/// directions data.
pub trait DirectionsProvider {
    fn directions(
        &self,
        request: &DirectionsRequest,
    ) -> Result<DirectionsResponse, DirectionsError>;
}

/// Position watch tuning exposed to the hosting app.
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Minimum interval between updates, in milliseconds.
    pub min_interval_ms: u64,
    /// Minimum movement before an update is emitted, in meters.
    pub min_distance_meters: f64,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            min_interval_ms: 3000,
            min_distance_meters: 10.0,
        }
    }
}

/// Callback receiving live position updates.
pub type PositionCallback = Box<dyn FnMut(Coordinate) + Send>;

/// External source of live device positions.
///
/// Updates must be delivered in the order they were observed; the
/// tracker serializes processing but does not reorder.
pub trait PositionSource {
    /// Starts delivering updates to `callback` until the returned
    /// handle is cancelled or dropped.
    fn subscribe(
        &self,
        options: &WatchOptions,
        callback: PositionCallback,
    ) -> Box<dyn PositionSubscription>;
}

/// Handle to an active position watch.
pub trait PositionSubscription: Send {
    /// Stops delivery. Idempotent.
    fn cancel(&mut self);
}
