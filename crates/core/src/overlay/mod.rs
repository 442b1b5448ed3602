//! Overlay session lifecycle.
//!
//! Exactly one [`OverlaySession`] is live at a time. The
//! [`OverlaySessionManager`] holds exclusive write access to "what overlays
//! currently exist": it installs a complete session in one call (clearing
//! any predecessor first) and tears everything down on [`clear`]. No other
//! component adds or removes overlays.
//!
//! [`clear`]: OverlaySessionManager::clear

use std::sync::Arc;

use dobato_route::models::types::{HazardAnnotation, RouteCandidate, RouteId};
use tracing::debug;

use crate::resolve::ResolvedPlace;

mod surface;

pub use surface::{MapSurface, MarkerIcon, OverlayHandle, PathStyle};

/// The two resolved endpoints of one search.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionEndpoints {
    pub start: ResolvedPlace,
    pub end: ResolvedPlace,
}

/// The pair of candidates offered by one search.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionRoutes {
    pub a: RouteCandidate,
    pub b: RouteCandidate,
}

impl SessionRoutes {
    pub fn get(&self, id: RouteId) -> &RouteCandidate {
        match id {
            RouteId::A => &self.a,
            RouteId::B => &self.b,
        }
    }
}

/// Everything belonging to one completed search, displayed atomically.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlaySession {
    pub routes: SessionRoutes,
    pub endpoints: SessionEndpoints,
    pub hazards: Vec<HazardAnnotation>,
    pub selection: Option<RouteId>,
}

impl OverlaySession {
    pub fn candidate(&self, id: RouteId) -> &RouteCandidate {
        self.routes.get(id)
    }
}

struct ActiveOverlays {
    session: OverlaySession,
    handles: Vec<OverlayHandle>,
}

/// Owner of the live session and its rendered overlays.
pub struct OverlaySessionManager {
    surface: Arc<dyn MapSurface>,
    active: Option<ActiveOverlays>,
}

impl OverlaySessionManager {
    pub fn new(surface: Arc<dyn MapSurface>) -> Self {
        Self {
            surface,
            active: None,
        }
    }

    /// Install a new session, tearing down the previous one first.
    ///
    /// Runs start to finish inside one `&mut self` call with no await
    /// points, so callers never observe a mix of old and new overlays.
    pub fn begin_session(
        &mut self,
        endpoints: SessionEndpoints,
        routes: (RouteCandidate, RouteCandidate),
        hazards: Vec<HazardAnnotation>,
    ) -> &OverlaySession {
        self.clear();

        let (a, b) = routes;
        let mut handles = Vec::with_capacity(4 + hazards.len());

        handles.push(self.surface.add_path(a.points(), PathStyle::for_risk(a.risk)));
        handles.push(self.surface.add_path(b.points(), PathStyle::for_risk(b.risk)));
        handles.push(
            self.surface
                .add_marker(endpoints.start.location, MarkerIcon::Start),
        );
        handles.push(
            self.surface
                .add_marker(endpoints.end.location, MarkerIcon::End),
        );
        for hazard in &hazards {
            handles.push(
                self.surface
                    .add_marker(hazard.position, MarkerIcon::Hazard(hazard.kind)),
            );
        }
        self.surface.fit_bounds(&handles);

        debug!(
            start = %endpoints.start.label,
            end = %endpoints.end.label,
            overlays = handles.len(),
            "installed overlay session"
        );

        let session = OverlaySession {
            routes: SessionRoutes { a, b },
            endpoints,
            hazards,
            selection: None,
        };
        &self
            .active
            .insert(ActiveOverlays { session, handles })
            .session
    }

    /// Remove every overlay of the active session. No-op when none is active.
    pub fn clear(&mut self) {
        if let Some(active) = self.active.take() {
            for handle in &active.handles {
                self.surface.remove_overlay(*handle);
            }
            debug!(overlays = active.handles.len(), "cleared overlay session");
        }
    }

    pub fn active(&self) -> Option<&OverlaySession> {
        self.active.as_ref().map(|a| &a.session)
    }

    pub fn active_mut(&mut self) -> Option<&mut OverlaySession> {
        self.active.as_mut().map(|a| &mut a.session)
    }
}


#[cfg(test)]
mod tests {
    use dobato_route::prelude::*;

    use super::testing::RecordingSurface;
    use super::*;

    fn place(lat: f64, lon: f64, label: &str) -> ResolvedPlace {
        ResolvedPlace {
            location: Coordinate::new(lat, lon).unwrap(),
            label: label.into(),
        }
    }

    fn fixtures() -> (SessionEndpoints, (RouteCandidate, RouteCandidate), Vec<HazardAnnotation>) {
        let start = place(28.2096, 83.9856, "Pokhara");
        let end = place(27.7172, 85.3240, "Kathmandu");
        let routes = synthesize(start.location, end.location, &SynthesisConfig::default());
        let hazards = annotate(
            midpoint(start.location, end.location),
            &AnnotatorConfig::default(),
        );
        (SessionEndpoints { start, end }, routes, hazards)
    }

    #[test]
    fn test_begin_session_installs_all_overlays() {
        let surface = RecordingSurface::new();
        let mut manager = OverlaySessionManager::new(surface.clone());

        let (endpoints, routes, hazards) = fixtures();
        let session = manager.begin_session(endpoints, routes, hazards);

        assert_eq!(session.hazards.len(), 3);
        assert_eq!(session.selection, None);
        // 2 paths + 2 endpoint markers + 3 hazard markers
        assert_eq!(surface.live_handles().len(), 7);
    }

    #[test]
    fn test_begin_session_twice_leaves_only_second() {
        let surface = RecordingSurface::new();
        let mut manager = OverlaySessionManager::new(surface.clone());

        let (endpoints, routes, hazards) = fixtures();
        manager.begin_session(endpoints, routes, hazards);
        let first_handles = surface.live_handles();

        let start = place(26.4525, 87.2718, "Biratnagar");
        let end = place(28.9634, 80.1819, "Mahendranagar");
        let routes = synthesize(start.location, end.location, &SynthesisConfig::default());
        let hazards = annotate(
            midpoint(start.location, end.location),
            &AnnotatorConfig::default(),
        );
        manager.begin_session(SessionEndpoints { start, end }, routes, hazards);

        let live = surface.live_handles();
        assert_eq!(live.len(), 7);
        for handle in first_handles {
            assert!(!live.contains(&handle), "first session leaked {handle}");
        }
    }

    #[test]
    fn test_clear_removes_everything() {
        let surface = RecordingSurface::new();
        let mut manager = OverlaySessionManager::new(surface.clone());

        let (endpoints, routes, hazards) = fixtures();
        manager.begin_session(endpoints, routes, hazards);
        manager.clear();

        assert!(surface.live_handles().is_empty());
        assert!(manager.active().is_none());
    }

    #[test]
    fn test_clear_on_empty_manager_is_noop() {
        let surface = RecordingSurface::new();
        let mut manager = OverlaySessionManager::new(surface.clone());

        manager.clear();
        manager.clear();

        assert!(surface.commands.lock().unwrap().is_empty());
        assert!(manager.active().is_none());
    }

    #[test]
    fn test_fit_bounds_covers_new_overlays() {
        use super::testing::SurfaceCommand;

        let surface = RecordingSurface::new();
        let mut manager = OverlaySessionManager::new(surface.clone());

        let (endpoints, routes, hazards) = fixtures();
        manager.begin_session(endpoints, routes, hazards);

        let commands = surface.commands.lock().unwrap();
        let fit = commands
            .iter()
            .find_map(|c| match c {
                SurfaceCommand::FitBounds(handles) => Some(handles.clone()),
                _ => None,
            })
            .expect("fit_bounds was issued");
        assert_eq!(fit.len(), 7);
    }
}
