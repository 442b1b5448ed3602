//! Route selection and its derived explanation.
//!
//! Selection is a pure function over the active session: the UI layer
//! forwards a click (or a typed candidate name) and renders the returned
//! explanation. No map rendering is involved.

use dobato_route::models::types::{RiskProfile, RouteId};

use crate::overlay::OverlaySession;

/// Why a selected candidate is (or is not) a good idea, fixed per risk
/// profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionExplanation {
    pub route: RouteId,
    pub risk: RiskProfile,
    pub summary: &'static str,
}

pub(crate) fn summary_for(risk: RiskProfile) -> &'static str {
    match risk {
        RiskProfile::FasterRiskier => "recommended when speed is critical",
        RiskProfile::Safer => "recommended for safer, more reliable travel",
    }
}

/// Explain a candidate of the given session.
pub fn explain(session: &OverlaySession, id: RouteId) -> SelectionExplanation {
    let candidate = session.candidate(id);
    SelectionExplanation {
        route: id,
        risk: candidate.risk,
        summary: summary_for(candidate.risk),
    }
}

/// Usage errors in selection. Correct orchestration never produces these;
/// the engine logs them and carries on rather than crashing.
#[derive(Debug, thiserror::Error)]
pub enum SelectError {
    #[error("no active session to select a route in")]
    SessionNotFound,

    #[error("{0:?} is not one of the offered routes")]
    InvalidSelection(String),
}
