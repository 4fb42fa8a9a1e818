//! Display-boundary unit conversions.
//!
//! Internal values stay in meters and seconds (and kilometers for the
//! turn-proximity math); the clients convert only when rendering.

pub const METERS_PER_MILE: f64 = 1609.34;

pub fn meters_to_miles(meters: f64) -> f64 {
    meters / METERS_PER_MILE
}

/// Splits a duration into whole hours and remaining minutes, rounding
/// to the nearest minute.
pub fn split_duration(total_seconds: f64) -> (u64, u64) {
    let minutes = (total_seconds / 60.0).round() as u64;
    (minutes / 60, minutes % 60)
}

/// Formats a distance-to-turn for the step card: meters below 0.1 km,
/// otherwise one decimal of kilometers.
pub fn format_turn_distance_km(km: f64) -> String {
    if km < 0.1 {
        format!("{} m", (km * 1000.0).round() as i64)
    } else {
        format!("{:.1} km", km)
    }
}
