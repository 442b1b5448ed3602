//! Nominatim-backed implementation of [`GeoResolver`].
//!
//! Queries the public Nominatim search API with a fixed country qualifier
//! appended to every lookup, takes the first hit, and validates the
//! returned coordinates before handing them to the engine.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use dobato_route::models::types::Coordinate;
use serde::Deserialize;
use tracing::debug;

use super::{GeoResolver, ResolveError, ResolvedPlace, Result};

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

// Nominatim's usage policy requires an identifying User-Agent.
const USER_AGENT: &str = concat!("dobato/", env!("CARGO_PKG_VERSION"));

/// One search hit as returned by Nominatim. Coordinates arrive as strings.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchHit {
    pub lat: String,
    pub lon: String,
    pub display_name: String,
}

pub struct NominatimResolver {
    client: reqwest::Client,
    base_url: String,
    /// Country qualifier appended to every query, e.g. "Nepal".
    country: Arc<str>,
}

impl NominatimResolver {
    pub fn new(country: impl AsRef<str>) -> Result<Self> {
        Self::with_base_url(country, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(country: impl AsRef<str>, base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ResolveError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            country: country.as_ref().into(),
        })
    }

    async fn lookup(&self, query: &str) -> Result<ResolvedPlace> {
        let qualified = format!("{}, {}", query, self.country);
        debug!(%qualified, "resolving place");

        let hits: Vec<SearchHit> = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("q", qualified.as_str()), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| ResolveError::Network(e.to_string()))?
            .error_for_status()
            .map_err(|e| ResolveError::Network(e.to_string()))?
            .json()
            .await
            .map_err(|e| ResolveError::Network(e.to_string()))?;

        let Some(hit) = hits.into_iter().next() else {
            return Err(ResolveError::PlaceNotFound(query.to_owned()));
        };

        hit.into_place()
    }
}

impl SearchHit {
    pub(crate) fn into_place(self) -> Result<ResolvedPlace> {
        let lat: f64 = self
            .lat
            .parse()
            .map_err(|_| ResolveError::Network(format!("unparseable latitude {:?}", self.lat)))?;
        let lon: f64 = self
            .lon
            .parse()
            .map_err(|_| ResolveError::Network(format!("unparseable longitude {:?}", self.lon)))?;

        Ok(ResolvedPlace {
            location: Coordinate::new(lat, lon)?,
            label: self.display_name.into(),
        })
    }
}

impl GeoResolver for NominatimResolver {
    fn resolve<'a>(
        &'a self,
        query: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<ResolvedPlace>> + Send + 'a>> {
        Box::pin(self.lookup(query))
    }
}
