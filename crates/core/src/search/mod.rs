//! Search orchestration.
//!
//! One logical flow per search: validate the two free-text endpoints,
//! resolve them concurrently, synthesize the candidate pair, annotate the
//! corridor, then atomically install the overlay session. Repeated searches
//! race only through a generation token: results of a search that has been
//! superseded while suspended at I/O are discarded and never touch the
//! overlay manager.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use dobato_route::geometry::midpoint;
use dobato_route::hazard::{AnnotatorConfig, annotate};
use dobato_route::models::types::RouteId;
use dobato_route::synth::{SynthesisConfig, synthesize};
use tracing::{debug, info, warn};

use crate::overlay::{MapSurface, OverlaySession, OverlaySessionManager, SessionEndpoints};
use crate::resolve::{GeoResolver, ResolveError};
use crate::select::{SelectError, SelectionExplanation, explain};

/// Tuning for one engine instance; demo defaults, all overridable.
#[derive(Clone, Debug, Default)]
pub struct SearchConfig {
    pub synthesis: SynthesisConfig,
    pub hazards: AnnotatorConfig,
}

/// Where the most recent search attempt currently stands.
///
/// `Failed` is terminal for that attempt; the next search moves straight
/// back to `Resolving`. The failure message itself travels in the returned
/// [`SearchError`], not here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Resolving,
    Synthesizing,
    Annotating,
    SessionActive,
    Failed,
}

/// Which of the two search inputs an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::End => write!(f, "destination"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Empty input, recovered locally; the resolver is never contacted.
    #[error("the {0} place name must not be empty")]
    Validation(Endpoint),

    #[error("could not resolve the {endpoint}: {source}")]
    Resolve {
        endpoint: Endpoint,
        source: ResolveError,
    },

    /// A newer search started while this one was suspended at I/O; its
    /// results were discarded. Callers can silently ignore this.
    #[error("superseded by a newer search")]
    Superseded,
}

impl SearchError {
    /// Human-readable rendering with retry guidance. Distinguishes "place
    /// not found" from other resolver failures.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(_) => "Enter both a start and a destination place name.".to_owned(),
            Self::Resolve {
                endpoint,
                source: ResolveError::PlaceNotFound(query),
            } => format!(
                "No place named {query:?} was found for the {endpoint}. \
                 Try a more specific name, such as adding the district."
            ),
            Self::Resolve { endpoint, .. } => {
                format!("Looking up the {endpoint} failed. Check your connection and try again.")
            }
            Self::Superseded => "This search was replaced by a newer one.".to_owned(),
        }
    }
}

struct EngineState {
    overlays: OverlaySessionManager,
    phase: SearchPhase,
}

/// The search engine: single shared owner of the overlay manager, safe to
/// call from concurrent tasks. Stale in-flight searches are fenced off by
/// `generation`; the state mutex is only ever held across synchronous
/// sections, never across an await.
pub struct SearchEngine {
    resolver: Arc<dyn GeoResolver>,
    config: SearchConfig,
    generation: AtomicU64,
    state: Mutex<EngineState>,
}

impl SearchEngine {
    pub fn new(
        resolver: Arc<dyn GeoResolver>,
        surface: Arc<dyn MapSurface>,
        config: SearchConfig,
    ) -> Self {
        Self {
            resolver,
            config,
            generation: AtomicU64::new(0),
            state: Mutex::new(EngineState {
                overlays: OverlaySessionManager::new(surface),
                phase: SearchPhase::Idle,
            }),
        }
    }

    /// Run one full search. On success the returned snapshot equals the
    /// newly installed live session.
    pub async fn search(
        &self,
        start_text: &str,
        end_text: &str,
    ) -> Result<OverlaySession, SearchError> {
        let start_text = start_text.trim();
        let end_text = end_text.trim();
        if start_text.is_empty() {
            return Err(SearchError::Validation(Endpoint::Start));
        }
        if end_text.is_empty() {
            return Err(SearchError::Validation(Endpoint::End));
        }

        // The previous session dies with the start of the new attempt.
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.lock().unwrap();
            state.overlays.clear();
            state.phase = SearchPhase::Resolving;
        }
        info!(start = start_text, end = end_text, generation, "search started");

        // Independent lookups, resolved concurrently.
        let (start_result, end_result) = tokio::join!(
            self.resolver.resolve(start_text),
            self.resolver.resolve(end_text)
        );
        if !self.is_current(generation) {
            debug!(generation, "search superseded during resolution");
            return Err(SearchError::Superseded);
        }

        let start_place =
            start_result.map_err(|source| self.fail(generation, Endpoint::Start, source))?;
        let end_place = end_result.map_err(|source| self.fail(generation, Endpoint::End, source))?;

        self.set_phase(generation, SearchPhase::Synthesizing);
        let routes = synthesize(
            start_place.location,
            end_place.location,
            &self.config.synthesis,
        );

        self.set_phase(generation, SearchPhase::Annotating);
        let corridor_mid = midpoint(start_place.location, end_place.location);
        let hazards = annotate(corridor_mid, &self.config.hazards);

        let mut state = self.state.lock().unwrap();
        if !self.is_current(generation) {
            debug!(generation, "search superseded before commit");
            return Err(SearchError::Superseded);
        }
        let session = state
            .overlays
            .begin_session(
                SessionEndpoints {
                    start: start_place,
                    end: end_place,
                },
                routes,
                hazards,
            )
            .clone();
        state.phase = SearchPhase::SessionActive;
        info!(generation, "session active");
        Ok(session)
    }

    /// Select a candidate of the active session and record the selection.
    /// Works repeatedly without re-resolving.
    pub fn select_route(&self, id: RouteId) -> Result<SelectionExplanation, SelectError> {
        let mut state = self.state.lock().unwrap();
        match state.overlays.active_mut() {
            Some(session) => {
                session.selection = Some(id);
                Ok(explain(session, id))
            }
            None => {
                warn!(%id, "route selected with no active session");
                Err(SelectError::SessionNotFound)
            }
        }
    }

    /// Selection by user-supplied candidate name ("A"/"B").
    pub fn select_route_named(&self, name: &str) -> Result<SelectionExplanation, SelectError> {
        let Ok(id) = name.parse::<RouteId>() else {
            warn!(name, "unknown candidate name");
            return Err(SelectError::InvalidSelection(name.to_owned()));
        };
        self.select_route(id)
    }

    /// Tear the active session down without starting a new search.
    pub fn clear(&self) {
        let mut state = self.state.lock().unwrap();
        state.overlays.clear();
        state.phase = SearchPhase::Idle;
    }

    /// Snapshot of the live session, if any.
    pub fn session(&self) -> Option<OverlaySession> {
        self.state.lock().unwrap().overlays.active().cloned()
    }

    pub fn phase(&self) -> SearchPhase {
        self.state.lock().unwrap().phase
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn set_phase(&self, generation: u64, phase: SearchPhase) {
        if self.is_current(generation) {
            self.state.lock().unwrap().phase = phase;
        }
    }

    fn fail(&self, generation: u64, endpoint: Endpoint, source: ResolveError) -> SearchError {
        warn!(%endpoint, error = %source, "resolution failed");
        self.set_phase(generation, SearchPhase::Failed);
        SearchError::Resolve { endpoint, source }
    }
}
