//! Pluggable place resolution.
//!
//! The engine treats geocoding as an opaque collaborator: free text in,
//! coordinate plus display label out, or failure. Implementations must be
//! stateless between calls (restartable with different text).

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use dobato_route::models::types::{Coordinate, RouteError};

mod nominatim;

pub use nominatim::NominatimResolver;

/// A successfully resolved place.
///
/// Only ever produced by a [`GeoResolver`]; the engine never constructs one
/// synthetically.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedPlace {
    pub location: Coordinate,
    /// Human-readable resolved name.
    pub label: Arc<str>,
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("no place matching {0:?} was found")]
    PlaceNotFound(String),

    /// The resolver returned out-of-range data. Surfaced to users as a
    /// generic resolution failure, never fatal.
    #[error("resolver returned an unusable location: {0}")]
    InvalidCoordinate(#[from] RouteError),

    #[error("resolver request failed: {0}")]
    Network(String),
}

pub type Result<T> = std::result::Result<T, ResolveError>;

/// Resolve free text to a place
pub trait GeoResolver: Send + Sync {
    fn resolve<'a>(
        &'a self,
        query: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<ResolvedPlace>> + Send + 'a>>;
}
