//! Real Las Vegas locations for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap. These are real pickup and
//! dropoff spots the clients actually route between.

use ride_nav::coord::Coordinate;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coord(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

pub const WYNN: Location = Location::new("Wynn Las Vegas", 36.1263781, -115.1658180);
pub const BELLAGIO: Location = Location::new("Bellagio", 36.1126284, -115.1767292);
pub const AIRPORT: Location = Location::new("Harry Reid Airport", 36.0850717, -115.1537566);
pub const FREMONT: Location = Location::new("Fremont Street", 36.1699412, -115.1398296);
pub const HENDERSON: Location = Location::new("Henderson City Hall", 36.0395247, -114.9817213);
