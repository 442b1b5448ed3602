//! Simulated hazard annotation along a corridor.
//!
//! Stands in for a live hazard feed. The contract callers depend on:
//! deterministic for the same midpoint, catalog and count; spacing and
//! catalog are configuration, never live data.

use std::sync::Arc;

use crate::models::types::{Coordinate, HazardAnnotation, HazardKind};

/// One `{kind, reason}` entry the annotator cycles through.
#[derive(Clone, Debug)]
pub struct HazardTemplate {
    pub kind: HazardKind,
    pub reason: Arc<str>,
}

impl HazardTemplate {
    pub fn new(kind: HazardKind, reason: impl AsRef<str>) -> Self {
        Self {
            kind,
            reason: reason.as_ref().into(),
        }
    }
}

/// Tuning for hazard annotation.
///
/// Defaults reproduce the reference behavior (3 annotations, 0.05 degree
/// spacing); the step size is an arbitrary demo value.
#[derive(Clone, Debug)]
pub struct AnnotatorConfig {
    /// Number of annotations to place.
    pub count: usize,
    /// Per-index offset in degrees: annotation `i` lands at
    /// `(mid.lat + i*step, mid.lon - i*step)`.
    pub step_deg: f64,
    /// Ordered catalog the annotations cycle through.
    pub catalog: Vec<HazardTemplate>,
}

impl AnnotatorConfig {
    pub const DEFAULT_COUNT: usize = 3;
    pub const DEFAULT_STEP_DEG: f64 = 0.05;

    pub fn default_catalog() -> Vec<HazardTemplate> {
        vec![
            HazardTemplate::new(HazardKind::Flooding, "Heavy rainfall reported"),
            HazardTemplate::new(HazardKind::Construction, "Ongoing road maintenance"),
            HazardTemplate::new(HazardKind::Congestion, "High traffic volume"),
        ]
    }
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            count: Self::DEFAULT_COUNT,
            step_deg: Self::DEFAULT_STEP_DEG,
            catalog: Self::default_catalog(),
        }
    }
}

/// Place simulated hazard annotations around a corridor midpoint.
///
/// Positions are clamped into the valid coordinate range, so midpoints near
/// the range edges stay representable. An empty catalog yields an empty
/// list. No failure modes.
pub fn annotate(corridor_midpoint: Coordinate, cfg: &AnnotatorConfig) -> Vec<HazardAnnotation> {
    if cfg.catalog.is_empty() {
        return Vec::new();
    }

    (0..cfg.count)
        .map(|i| {
            let offset = i as f64 * cfg.step_deg;
            let template = &cfg.catalog[i % cfg.catalog.len()];
            HazardAnnotation {
                kind: template.kind,
                reason: template.reason.clone(),
                position: Coordinate::clamped(
                    corridor_midpoint.lat() + offset,
                    corridor_midpoint.lon() - offset,
                ),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn mid() -> Coordinate {
        Coordinate::new(27.9634, 84.6548).unwrap()
    }

    #[test]
    fn test_default_annotation_layout() {
        let hazards = annotate(mid(), &AnnotatorConfig::default());
        assert_eq!(hazards.len(), 3);

        assert_eq!(hazards[0].kind, HazardKind::Flooding);
        assert_eq!(&*hazards[0].reason, "Heavy rainfall reported");
        assert_eq!(hazards[0].position, mid());

        assert_eq!(hazards[1].kind, HazardKind::Construction);
        assert_relative_eq!(hazards[1].position.lat(), mid().lat() + 0.05, epsilon = 1e-9);
        assert_relative_eq!(hazards[1].position.lon(), mid().lon() - 0.05, epsilon = 1e-9);

        assert_eq!(hazards[2].kind, HazardKind::Congestion);
        assert_relative_eq!(hazards[2].position.lat(), mid().lat() + 0.10, epsilon = 1e-9);
        assert_relative_eq!(hazards[2].position.lon(), mid().lon() - 0.10, epsilon = 1e-9);
    }

    #[test]
    fn test_deterministic() {
        let cfg = AnnotatorConfig::default();
        let first = annotate(mid(), &cfg);
        let second = annotate(mid(), &cfg);
        assert_eq!(first, second);
    }

    #[test]
    fn test_count_cycles_catalog() {
        let cfg = AnnotatorConfig {
            count: 5,
            ..AnnotatorConfig::default()
        };
        let hazards = annotate(mid(), &cfg);

        assert_eq!(hazards.len(), 5);
        // 5 annotations over a 3-entry catalog wrap around
        assert_eq!(hazards[3].kind, HazardKind::Flooding);
        assert_eq!(hazards[4].kind, HazardKind::Construction);
    }

    #[test]
    fn test_custom_catalog_and_step() {
        let cfg = AnnotatorConfig {
            count: 2,
            step_deg: 0.5,
            catalog: vec![HazardTemplate::new(HazardKind::Accident, "Multi-vehicle pileup")],
        };
        let hazards = annotate(mid(), &cfg);

        assert_eq!(hazards.len(), 2);
        assert_eq!(hazards[0].kind, HazardKind::Accident);
        assert_eq!(hazards[1].kind, HazardKind::Accident);
        assert_relative_eq!(hazards[1].position.lat(), mid().lat() + 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_empty_catalog_yields_no_annotations() {
        let cfg = AnnotatorConfig {
            count: 3,
            step_deg: 0.05,
            catalog: Vec::new(),
        };
        assert!(annotate(mid(), &cfg).is_empty());
    }

    #[test]
    fn test_positions_clamped_at_range_edge() {
        let near_pole = Coordinate::new(89.97, -179.98).unwrap();
        let hazards = annotate(near_pole, &AnnotatorConfig::default());

        for h in &hazards {
            assert!(h.position.lat() <= 90.0);
            assert!(h.position.lon() >= -180.0);
        }
        assert_eq!(hazards[2].position.lat(), 90.0);
        assert_eq!(hazards[2].position.lon(), -180.0);
    }
}
