//! Geometric helpers for corridor construction.
//!
//! Uses Haversine formula for accurate distances on Earth's surface.

use geo::HaversineDistance;

use crate::models::types::Coordinate;

/// Arithmetic midpoint of two coordinates in degrees.
///
/// A plain mean is all the corridor needs; both inputs are validated so the
/// mean is always in range. (Not a geodesic midpoint; the corridor is a
/// synthetic approximation by design, see the synthesis module.)
pub fn midpoint(a: Coordinate, b: Coordinate) -> Coordinate {
    Coordinate::clamped((a.lat() + b.lat()) / 2.0, (a.lon() + b.lon()) / 2.0)
}

/// Haversine distance between two coordinates in meters.
pub fn haversine_distance(a: Coordinate, b: Coordinate) -> f64 {
    a.point().haversine_distance(&b.point())
}
