//! # dobato-route
//!
//! Deterministic route synthesis and hazard annotation over validated
//! geographic coordinates.
//!
//! ## Features
//!
//! - **Validated coordinates**: out-of-range latitude/longitude is
//!   unrepresentable past construction
//! - **Two-candidate synthesis**: a direct-ish and an alternate path between
//!   any two points, never geometrically identical
//! - **Simulated hazards**: a configurable, deterministic corridor annotation
//!   catalog standing in for a live hazard feed
//! - **No I/O**: everything in this crate is pure and synchronous
//!
//! ## Example
//!
//! ```
//! use dobato_route::prelude::*;
//!
//! let pokhara = Coordinate::new(28.2096, 83.9856).unwrap();
//! let kathmandu = Coordinate::new(27.7172, 85.3240).unwrap();
//!
//! let (a, b) = synthesize(pokhara, kathmandu, &SynthesisConfig::default());
//! assert_eq!(a.risk, RiskProfile::FasterRiskier);
//! assert_eq!(b.risk, RiskProfile::Safer);
//! assert_ne!(a.points(), b.points());
//!
//! let hazards = annotate(midpoint(pokhara, kathmandu), &AnnotatorConfig::default());
//! assert_eq!(hazards.len(), 3);
//! ```

pub mod geometry;
pub mod hazard;
pub mod models;
pub mod synth;

// Re-exports for convenience
pub mod prelude {
    pub use crate::geometry::{haversine_distance, midpoint};
    pub use crate::hazard::{annotate, AnnotatorConfig, HazardTemplate};
    pub use crate::models::types::*;
    pub use crate::synth::{synthesize, SynthesisConfig};
}
