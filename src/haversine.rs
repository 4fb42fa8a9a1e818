//! Great-circle distance calculations.
//!
//! Used for the turn-proximity checks in the progress tracker, for trip
//! distance summaries, and for ranking nearby address suggestions. The
//! earth radius is caller-supplied because the clients mix mile and
//! kilometer display contexts.

use crate::coord::Coordinate;

/// Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Earth radius in miles.
pub const EARTH_RADIUS_MI: f64 = 3959.0;

/// Cutoff for address suggestion ranking, in kilometers.
pub const SUGGESTION_RADIUS_KM: f64 = 5.0;

/// Haversine distance between two points, in the units of `earth_radius`.
///
/// Identical points return exactly 0, never NaN.
pub fn distance(a: Coordinate, b: Coordinate, earth_radius: f64) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lng = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push h marginally outside [0, 1] for identical or
    // near-antipodal points, which would make the sqrt calls produce NaN.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    earth_radius * c
}

/// Total length of a path, in the units of `earth_radius`.
pub fn path_distance(points: &[Coordinate], earth_radius: f64) -> f64 {
    points
        .windows(2)
        .map(|pair| distance(pair[0], pair[1], earth_radius))
        .sum()
}

/// Ranks candidate suggestions by distance from `origin`, nearest first,
/// dropping anything farther than `max_radius` (same units as
/// `earth_radius`).
///
/// Returns each surviving candidate paired with its distance so callers
/// can display it without re-deriving.
pub fn rank_by_proximity<T, F>(
    origin: Coordinate,
    candidates: Vec<T>,
    location: F,
    earth_radius: f64,
    max_radius: f64,
) -> Vec<(T, f64)>
where
    F: Fn(&T) -> Coordinate,
{
    let mut ranked: Vec<(T, f64)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let d = distance(origin, location(&candidate), earth_radius);
            (d <= max_radius).then_some((candidate, d))
        })
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked
}
