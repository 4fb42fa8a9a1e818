//! Route assembly: flattening raw directions data into one maneuver
//! sequence and one continuous path.
//!
//! Assembly never fails outright. Undecodable geometry fragments are
//! skipped, a missing per-step path falls back to the route-level
//! overview geometry, and a provider failure falls back to a straight
//! origin-to-destination line flagged as degraded.

use serde::Serialize;
use tracing::{debug, warn};

use crate::coord::Coordinate;
use crate::directions_data::DirectionsResponse;
use crate::polyline;
use crate::traits::{DirectionsProvider, DirectionsRequest};
use crate::units;

/// Maneuver category tag attached to a step by the directions service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ManeuverKind {
    TurnLeft,
    TurnRight,
    TurnSlightLeft,
    TurnSlightRight,
    TurnSharpLeft,
    TurnSharpRight,
    UturnLeft,
    UturnRight,
    RampLeft,
    RampRight,
    ForkLeft,
    ForkRight,
    Merge,
    RoundaboutLeft,
    RoundaboutRight,
    Straight,
    Unknown,
}

impl ManeuverKind {
    /// Maps the provider's maneuver tag. Absent or unrecognized tags
    /// become `Unknown`.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("turn-left") => ManeuverKind::TurnLeft,
            Some("turn-right") => ManeuverKind::TurnRight,
            Some("turn-slight-left") => ManeuverKind::TurnSlightLeft,
            Some("turn-slight-right") => ManeuverKind::TurnSlightRight,
            Some("turn-sharp-left") => ManeuverKind::TurnSharpLeft,
            Some("turn-sharp-right") => ManeuverKind::TurnSharpRight,
            Some("uturn-left") => ManeuverKind::UturnLeft,
            Some("uturn-right") => ManeuverKind::UturnRight,
            Some("ramp-left") => ManeuverKind::RampLeft,
            Some("ramp-right") => ManeuverKind::RampRight,
            Some("fork-left") => ManeuverKind::ForkLeft,
            Some("fork-right") => ManeuverKind::ForkRight,
            Some("merge") => ManeuverKind::Merge,
            Some("roundabout-left") => ManeuverKind::RoundaboutLeft,
            Some("roundabout-right") => ManeuverKind::RoundaboutRight,
            Some("straight") => ManeuverKind::Straight,
            _ => ManeuverKind::Unknown,
        }
    }
}

/// One driving instruction with its end coordinate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManeuverStep {
    /// Plain-text instruction, markup stripped.
    pub instruction: String,
    pub distance_text: String,
    pub duration_text: String,
    pub kind: ManeuverKind,
    pub end_location: Coordinate,
}

/// An assembled route: maneuver steps plus the continuous geometry.
///
/// Immutable after assembly; totals stay in meters and seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub steps: Vec<ManeuverStep>,
    pub path: Vec<Coordinate>,
    pub total_distance_meters: f64,
    pub total_duration_seconds: f64,
    /// True when directions were unavailable and the path is only a
    /// straight origin-to-destination line.
    pub degraded: bool,
}

impl Route {
    /// The straight-line fallback used when directions are unavailable.
    pub fn degraded(origin: Coordinate, destination: Coordinate) -> Self {
        Self {
            steps: Vec::new(),
            path: vec![origin, destination],
            total_distance_meters: 0.0,
            total_duration_seconds: 0.0,
            degraded: true,
        }
    }

    pub fn has_steps(&self) -> bool {
        !self.steps.is_empty()
    }

    /// Trip distance for mile-based display contexts.
    pub fn total_distance_miles(&self) -> f64 {
        units::meters_to_miles(self.total_distance_meters)
    }

    /// Trip duration as whole hours and remaining minutes.
    pub fn duration_hours_minutes(&self) -> (u64, u64) {
        units::split_duration(self.total_duration_seconds)
    }
}

/// Flattens a raw directions response into a [`Route`].
///
/// `origin` and `destination` anchor the straight-line fallback when the
/// response is unusable.
pub fn assemble(
    response: &DirectionsResponse,
    origin: Coordinate,
    destination: Coordinate,
) -> Route {
    if !response.is_ok() || response.routes.is_empty() {
        warn!(
            status = %response.status,
            "unusable directions response, degrading to straight line"
        );
        return Route::degraded(origin, destination);
    }

    let raw = &response.routes[0];
    let mut steps = Vec::new();
    let mut path: Vec<Coordinate> = Vec::new();
    let mut total_distance_meters = 0.0;
    let mut total_duration_seconds = 0.0;

    for leg in &raw.legs {
        for step in &leg.steps {
            match polyline::decode(&step.polyline.points) {
                Ok(fragment) => path.extend_from_slice(fragment.points()),
                Err(err) => debug!(%err, "skipping undecodable step geometry"),
            }

            total_distance_meters += step.distance.value;
            total_duration_seconds += step.duration.value;

            steps.push(ManeuverStep {
                instruction: strip_instruction_markup(&step.html_instructions),
                distance_text: step.distance.text.clone(),
                duration_text: step.duration.text.clone(),
                kind: ManeuverKind::from_tag(step.maneuver.as_deref()),
                end_location: step.end_location.into(),
            });
        }
    }

    if path.is_empty() {
        match polyline::decode(&raw.overview_polyline.points) {
            Ok(overview) if !overview.is_empty() => {
                debug!("no step geometry decoded, using overview geometry");
                path = overview.into_points();
            }
            _ => {
                warn!("no decodable geometry in response, degrading to straight line");
                let mut route = Route::degraded(origin, destination);
                route.steps = steps;
                return route;
            }
        }
    }

    Route {
        steps,
        path,
        total_distance_meters,
        total_duration_seconds,
        degraded: false,
    }
}

/// Fetches directions and assembles the route, degrading to a straight
/// line on any provider failure so navigation is never blocked by an
/// outage.
pub fn fetch_route<P: DirectionsProvider>(provider: &P, request: &DirectionsRequest) -> Route {
    match provider.directions(request) {
        Ok(response) => assemble(&response, request.origin, request.destination),
        Err(err) => {
            warn!(%err, "directions provider failed, degrading to straight line");
            Route::degraded(request.origin, request.destination)
        }
    }
}

/// Strips tag spans and decodes the non-breaking-space entity from a
/// provider instruction string.
fn strip_instruction_markup(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    text.replace("&nbsp;", " ").trim().to_string()
}
