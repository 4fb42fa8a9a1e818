//! Geographic coordinate value type.

use serde::{Deserialize, Serialize};

/// A WGS84 position in degrees.
///
/// Latitude is in [-90, 90], longitude in [-180, 180]. Immutable value
/// type; cheap to copy and safe to share.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<(f64, f64)> for Coordinate {
    /// Converts a `(latitude, longitude)` tuple.
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}
