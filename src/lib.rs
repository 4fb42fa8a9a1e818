//! ride-nav navigation core
//!
//! Route geometry and turn-by-turn progress tracking shared by the
//! driver and rider clients. Directions data and live positions come
//! from external collaborators behind the interfaces in [`traits`].

pub mod coord;
pub mod traits;
pub mod polyline;
pub mod haversine;
pub mod directions;
pub mod directions_data;
pub mod route;
pub mod tracker;
pub mod units;
