//! Pluggable map rendering surface.
//!
//! The engine owns no pixel or tile logic; it issues overlay commands
//! against this trait and an external renderer carries them out. The
//! surface hands back opaque handles the session manager uses for teardown.

use std::fmt;
use std::sync::Arc;

use dobato_route::models::types::{Coordinate, HazardKind, RiskProfile};

/// Opaque handle to one rendered overlay (a path or a marker).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OverlayHandle(pub u64);

impl fmt::Display for OverlayHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "overlay#{}", self.0)
    }
}

/// Rendering style for a path overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct PathStyle {
    /// Hex RGB, e.g. "#d9534f"
    pub color: Arc<str>,
    pub weight: f32,
}

impl PathStyle {
    /// Fixed per-profile styling so the two candidates are visually distinct.
    pub fn for_risk(risk: RiskProfile) -> Self {
        match risk {
            RiskProfile::FasterRiskier => Self {
                color: "#d9534f".into(),
                weight: 5.0,
            },
            RiskProfile::Safer => Self {
                color: "#5cb85c".into(),
                weight: 5.0,
            },
        }
    }
}

/// Which glyph a marker should carry. Glyph styling itself is the
/// renderer's business.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkerIcon {
    Start,
    End,
    Hazard(HazardKind),
}

/// Overlay command sink implemented by the rendering layer
pub trait MapSurface: Send + Sync {
    fn add_path(&self, points: &[Coordinate], style: PathStyle) -> OverlayHandle;
    fn add_marker(&self, position: Coordinate, icon: MarkerIcon) -> OverlayHandle;
    fn remove_overlay(&self, handle: OverlayHandle);

    /// Pan/zoom so every listed overlay is visible.
    fn fit_bounds(&self, handles: &[OverlayHandle]);
}
