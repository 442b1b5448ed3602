//! Two-candidate route synthesis.
//!
//! Given two endpoints, derives a pair of 3-point paths that share the
//! endpoints but diverge at the perturbed midpoint. This is a geometric
//! approximation standing in for real road-network routing, which is
//! explicitly out of scope; what callers rely on is that the two candidates
//! are deterministic and never coincident for distinct endpoints.

use crate::geometry::midpoint;
use crate::models::types::{Coordinate, RiskProfile, RouteCandidate, RouteId};

/// Tuning for route synthesis.
///
/// The default offset is an arbitrary demo value, not a meaningful domain
/// parameter; it only has to be non-zero for the distinctness guarantee to
/// hold.
#[derive(Clone, Copy, Debug)]
pub struct SynthesisConfig {
    /// Latitude offset in degrees applied to the midpoint: positive for
    /// candidate A, negative for candidate B. Must be greater than zero.
    pub divergence_offset_deg: f64,
}

impl SynthesisConfig {
    pub const DEFAULT_DIVERGENCE_OFFSET_DEG: f64 = 0.15;
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            divergence_offset_deg: Self::DEFAULT_DIVERGENCE_OFFSET_DEG,
        }
    }
}

/// Synthesize the two candidate paths between `start` and `end`.
///
/// Candidate A is labeled [`RiskProfile::FasterRiskier`], candidate B
/// [`RiskProfile::Safer`]; the labels are a fixed convention, not derived
/// from the geometry.
///
/// If `start == end` both candidates degenerate to a zero-length 3-point
/// path at that location; no perturbation is applied and nothing panics.
/// Out-of-range input is unrepresentable: [`Coordinate`] is validated at
/// construction, so this function cannot fail.
pub fn synthesize(
    start: Coordinate,
    end: Coordinate,
    cfg: &SynthesisConfig,
) -> (RouteCandidate, RouteCandidate) {
    let mid = midpoint(start, end);

    let (mid_a, mid_b) = if start == end {
        (mid, mid)
    } else {
        (
            Coordinate::clamped(mid.lat() + cfg.divergence_offset_deg, mid.lon()),
            Coordinate::clamped(mid.lat() - cfg.divergence_offset_deg, mid.lon()),
        )
    };

    let a = RouteCandidate::new_unchecked(
        RouteId::A,
        vec![start, mid_a, end],
        RiskProfile::FasterRiskier,
    );
    let b = RouteCandidate::new_unchecked(RouteId::B, vec![start, mid_b, end], RiskProfile::Safer);

    (a, b)
}
