//! Raw wire model of the directions service response.
//!
//! Mirrors the provider's multi-leg JSON shape (routes, legs, steps,
//! text/value pairs, encoded geometry fragments). The route assembler
//! flattens this into the crate's own [`crate::route::Route`]; nothing
//! else should consume these types directly.

use serde::Deserialize;

use crate::coord::Coordinate;

#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub routes: Vec<RawRoute>,
}

impl DirectionsResponse {
    /// Whether the provider reported a usable result.
    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRoute {
    #[serde(default)]
    pub overview_polyline: RawPolyline,
    #[serde(default)]
    pub legs: Vec<RawLeg>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLeg {
    #[serde(default)]
    pub steps: Vec<RawStep>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawStep {
    #[serde(default)]
    pub html_instructions: String,
    #[serde(default)]
    pub distance: TextValue,
    #[serde(default)]
    pub duration: TextValue,
    pub end_location: LatLng,
    #[serde(default)]
    pub polyline: RawPolyline,
    #[serde(default)]
    pub maneuver: Option<String>,
}

/// Display text plus the underlying numeric value (meters or seconds).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextValue {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub value: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<LatLng> for Coordinate {
    fn from(raw: LatLng) -> Self {
        Coordinate::new(raw.lat, raw.lng)
    }
}

/// An encoded polyline fragment as it appears on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPolyline {
    #[serde(default)]
    pub points: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_check() {
        let ok = DirectionsResponse {
            status: "OK".to_string(),
            routes: Vec::new(),
        };
        let denied = DirectionsResponse {
            status: "REQUEST_DENIED".to_string(),
            routes: Vec::new(),
        };
        assert!(ok.is_ok());
        assert!(!denied.is_ok());
    }

    #[test]
    fn test_latlng_conversion() {
        let c: Coordinate = LatLng { lat: 37.0, lng: -122.0 }.into();
        assert_eq!(c, Coordinate::new(37.0, -122.0));
    }
}
