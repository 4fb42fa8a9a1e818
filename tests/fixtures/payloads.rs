//! Raw directions payload builders.
//!
//! Builds the provider's JSON shape from coordinate data so tests can
//! exercise the full deserialize-then-assemble pipeline.

use serde_json::{json, Value};

use ride_nav::coord::Coordinate;
use ride_nav::polyline;

pub fn step(
    instruction: &str,
    meters: f64,
    seconds: f64,
    end: Coordinate,
    path: &[Coordinate],
    maneuver: Option<&str>,
) -> Value {
    let mut step = json!({
        "html_instructions": instruction,
        "distance": { "text": format!("{:.1} km", meters / 1000.0), "value": meters },
        "duration": { "text": format!("{:.0} mins", seconds / 60.0), "value": seconds },
        "end_location": { "lat": end.latitude, "lng": end.longitude },
        "polyline": { "points": polyline::encode(path) },
    });
    if let Some(tag) = maneuver {
        step["maneuver"] = json!(tag);
    }
    step
}

/// A full multi-leg OK response with an overview geometry.
pub fn directions(legs: Vec<Vec<Value>>, overview: &[Coordinate]) -> Value {
    json!({
        "status": "OK",
        "routes": [{
            "overview_polyline": { "points": polyline::encode(overview) },
            "legs": legs
                .into_iter()
                .map(|steps| json!({ "steps": steps }))
                .collect::<Vec<_>>(),
        }],
    })
}

pub fn error_status(status: &str) -> Value {
    json!({ "status": status, "routes": [] })
}
