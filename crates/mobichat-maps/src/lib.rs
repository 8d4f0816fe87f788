//! Google Maps Platform client for mobichat
//!
//! Wraps the two mapping calls the assistant depends on: a Places text
//! search biased to Brussels, and a transit route computation between two
//! place identifiers. Responses from the Routes API are passed through
//! verbatim so the model sees the full transit detail.

use std::time::Duration;

use serde::Deserialize;

/// Default Places text-search endpoint
pub const PLACES_SEARCH_URL: &str = "https://places.googleapis.com/v1/places:searchText";

/// Default Routes computation endpoint
pub const ROUTES_COMPUTE_URL: &str = "https://routes.googleapis.com/directions/v2:computeRoutes";

/// Queries are biased to Brussels by suffixing the place name
const QUERY_SUFFIX: &str = " brussels";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from the mapping service, kept distinguishable so tool results
/// can report each condition to the model instead of crashing the session.
#[derive(Debug, thiserror::Error)]
pub enum MapsError {
    #[error("no places matched the query '{query}'")]
    NoMatches { query: String },
    #[error("maps request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("maps API returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("failed to parse maps response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

/// A single hit from the Places text search
#[derive(Debug, Clone, Deserialize)]
pub struct Place {
    pub id: String,
    #[serde(rename = "formattedAddress", default)]
    pub formatted_address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaceSearchResponse {
    #[serde(default)]
    places: Vec<Place>,
}

/// Client for the Places and Routes APIs
#[derive(Debug, Clone)]
pub struct MapsClient {
    api_key: String,
    places_url: String,
    routes_url: String,
    client: reqwest::Client,
}

impl MapsClient {
    pub fn new(api_key: String) -> Result<Self, MapsError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            api_key,
            places_url: PLACES_SEARCH_URL.to_string(),
            routes_url: ROUTES_COMPUTE_URL.to_string(),
            client,
        })
    }

    /// Point both endpoints at a different host. Used by tests against a
    /// local mock server.
    pub fn with_base_urls(mut self, places_url: String, routes_url: String) -> Self {
        self.places_url = places_url;
        self.routes_url = routes_url;
        self
    }

    /// Search for a place by name, biased to Brussels, and return the first
    /// match. An empty result list is a `NoMatches` error, not a fault.
    pub async fn search_place(&self, place: &str) -> Result<Place, MapsError> {
        let query = format!("{}{}", place, QUERY_SUFFIX);
        let payload = serde_json::json!({ "textQuery": query });

        let response = self
            .client
            .post(&self.places_url)
            .query(&[("key", self.api_key.as_str()), ("fields", "*")])
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MapsError::Api { status, body });
        }

        let body = response.text().await?;
        let search: PlaceSearchResponse = serde_json::from_str(&body)?;
        search
            .places
            .into_iter()
            .next()
            .ok_or(MapsError::NoMatches { query })
    }

    /// Compute a public-transit route between two place identifiers at the
    /// given RFC 3339 departure time. The routes JSON is returned unmodified.
    pub async fn compute_route(
        &self,
        origin: &str,
        destination: &str,
        departure_time: &str,
    ) -> Result<serde_json::Value, MapsError> {
        let payload = serde_json::json!({
            "origin": { "placeId": origin },
            "destination": { "placeId": destination },
            "travelMode": "TRANSIT",
            "departureTime": departure_time,
            "languageCode": "en-US"
        });

        let response = self
            .client
            .post(&self.routes_url)
            .query(&[("key", self.api_key.as_str()), ("fields", "routes")])
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MapsError::Api { status, body });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
