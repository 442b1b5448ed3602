//! # dobato-core
//!
//! Search orchestration and map overlay ownership for the two-candidate
//! route explorer.
//!
//! The flow per search: resolve both free-text endpoints concurrently
//! ([`resolve`]), synthesize two candidate paths and corridor hazards
//! (`dobato-route`), then atomically replace the previous search's overlays
//! ([`overlay`]) and expose the candidates for selection ([`select`]).
//! [`search::SearchEngine`] ties the pieces together and guards against
//! stale in-flight searches with a generation token.

pub mod overlay;
pub mod resolve;
pub mod search;
pub mod select;

// Re-export the model crate from the core crate
pub use dobato_route as route;
