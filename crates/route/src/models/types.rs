//! Core data types and enums for route synthesis.

use std::fmt;
use std::sync::Arc;

use geo::{LineString, Point};

// ============================================================================
// Coordinates
// ============================================================================

/// A validated geographic coordinate in degrees.
///
/// Latitude is in `[-90, 90]`, longitude in `[-180, 180]`. Values outside
/// those ranges cannot be constructed, so downstream geometry never has to
/// re-check them.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&lat)
            || !(-180.0..=180.0).contains(&lon)
            || !lat.is_finite()
            || !lon.is_finite()
        {
            return Err(RouteError::InvalidCoordinate { lat, lon });
        }
        Ok(Self { lat, lon })
    }

    /// Construct by clamping into the valid range.
    ///
    /// Used for engine-internal synthetic offsets (divergence, hazard
    /// spacing) so arithmetic near the range edges stays representable.
    /// Non-finite input clamps to zero.
    pub fn clamped(lat: f64, lon: f64) -> Self {
        let lat = if lat.is_finite() { lat.clamp(-90.0, 90.0) } else { 0.0 };
        let lon = if lon.is_finite() { lon.clamp(-180.0, 180.0) } else { 0.0 };
        Self { lat, lon }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// As a `geo` point (x = longitude, y = latitude).
    pub fn point(&self) -> Point {
        Point::new(self.lon, self.lat)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}

// ============================================================================
// Route candidates
// ============================================================================

/// Identifier of one of the two candidates offered per search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RouteId {
    A,
    B,
}

/// A user-supplied candidate name that is neither "A" nor "B".
#[derive(Debug, thiserror::Error)]
#[error("unknown route candidate {0:?}")]
pub struct ParseRouteIdError(String);

impl std::str::FromStr for RouteId {
    type Err = ParseRouteIdError;

    /// Parses a user-supplied candidate name ("A"/"B", case-insensitive).
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(Self::A),
            "B" | "b" => Ok(Self::B),
            other => Err(ParseRouteIdError(other.to_owned())),
        }
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// Labeling convention for the two candidates, fixed by construction.
///
/// Not derived from any property of the geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RiskProfile {
    FasterRiskier,
    Safer,
}

/// One synthesized path between two endpoints.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteCandidate {
    pub id: RouteId,
    // Invariant: at least 3 points, enforced at construction.
    points: Vec<Coordinate>,
    pub risk: RiskProfile,
}

impl RouteCandidate {
    pub fn new(id: RouteId, points: Vec<Coordinate>, risk: RiskProfile) -> Result<Self> {
        if points.len() < 3 {
            return Err(RouteError::TooFewPoints(points.len()));
        }
        Ok(Self { id, points, risk })
    }

    /// Caller guarantees at least 3 points.
    pub(crate) fn new_unchecked(id: RouteId, points: Vec<Coordinate>, risk: RiskProfile) -> Self {
        debug_assert!(points.len() >= 3);
        Self { id, points, risk }
    }

    /// Ordered path, always at least 3 points.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn start(&self) -> Coordinate {
        self.points[0]
    }

    pub fn end(&self) -> Coordinate {
        self.points[self.points.len() - 1]
    }

    /// Physical path as a `geo` line string (for rendering and queries).
    pub fn line_string(&self) -> LineString {
        LineString::from(
            self.points
                .iter()
                .map(|c| geo::Coord {
                    x: c.lon(),
                    y: c.lat(),
                })
                .collect::<Vec<_>>(),
        )
    }

    /// Total path length in meters (Haversine).
    pub fn length_meters(&self) -> f64 {
        use geo::HaversineLength;
        self.line_string().haversine_length()
    }
}

// ============================================================================
// Hazards
// ============================================================================

/// Category of a simulated hazard annotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HazardKind {
    Flooding,
    Construction,
    Congestion,
    Accident,
    Other,
}

impl fmt::Display for HazardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flooding => write!(f, "Flooding"),
            Self::Construction => write!(f, "Construction"),
            Self::Congestion => write!(f, "Congestion"),
            Self::Accident => write!(f, "Accident"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// A simulated, non-authoritative hazard point along the corridor.
///
/// Never implies live data freshness.
#[derive(Clone, Debug, PartialEq)]
pub struct HazardAnnotation {
    pub kind: HazardKind,
    pub reason: Arc<str>,
    pub position: Coordinate,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("Coordinate out of range: lat {lat}, lon {lon}")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("A route needs at least 3 points, got {0}")]
    TooFewPoints(usize),
}

pub type Result<T> = std::result::Result<T, RouteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_bounds() {
        assert!(Coordinate::new(0.0, 0.0).is_ok());
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());

        assert!(Coordinate::new(90.01, 0.0).is_err());
        assert!(Coordinate::new(-90.01, 0.0).is_err());
        assert!(Coordinate::new(0.0, 180.01).is_err());
        assert!(Coordinate::new(0.0, -180.01).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_coordinate_clamped() {
        let c = Coordinate::clamped(95.0, -200.0);
        assert_eq!(c.lat(), 90.0);
        assert_eq!(c.lon(), -180.0);

        let c = Coordinate::clamped(f64::NAN, 10.0);
        assert_eq!(c.lat(), 0.0);
        assert_eq!(c.lon(), 10.0);
    }

    #[test]
    fn test_coordinate_point_axes() {
        let c = Coordinate::new(28.2096, 83.9856).unwrap();
        let p = c.point();
        assert_eq!(p.x(), 83.9856); // longitude on x
        assert_eq!(p.y(), 28.2096); // latitude on y
    }

    #[test]
    fn test_route_id_from_str() {
        assert_eq!("A".parse::<RouteId>().unwrap(), RouteId::A);
        assert_eq!(" b ".parse::<RouteId>().unwrap(), RouteId::B);
        assert!("C".parse::<RouteId>().is_err());
        assert!("".parse::<RouteId>().is_err());
    }

    #[test]
    fn test_candidate_needs_three_points() {
        let p = Coordinate::new(28.2096, 83.9856).unwrap();

        assert!(matches!(
            RouteCandidate::new(RouteId::A, vec![], RiskProfile::Safer),
            Err(RouteError::TooFewPoints(0))
        ));
        assert!(matches!(
            RouteCandidate::new(RouteId::A, vec![p, p], RiskProfile::Safer),
            Err(RouteError::TooFewPoints(2))
        ));
        assert!(RouteCandidate::new(RouteId::A, vec![p, p, p], RiskProfile::Safer).is_ok());
    }

    #[test]
    fn test_candidate_length() {
        let candidate = RouteCandidate::new(
            RouteId::A,
            vec![
                Coordinate::new(28.2096, 83.9856).unwrap(),
                Coordinate::new(28.0, 84.6).unwrap(),
                Coordinate::new(27.7172, 85.3240).unwrap(),
            ],
            RiskProfile::FasterRiskier,
        )
        .unwrap();

        // Pokhara to Kathmandu is roughly 140 km as the crow flies; the
        // 3-point path is a bit longer.
        let len = candidate.length_meters();
        assert!(len > 100_000.0 && len < 250_000.0, "length was {len}");
    }
}
