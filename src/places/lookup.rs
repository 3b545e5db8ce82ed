//! Place lookup collaborator
//!
//! The narrow interface discovery uses to find places, plus an HTTP client
//! for the Google Places text-search API. Lookup failures never abort a
//! request; discovery skips the failing category and keeps going.

use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::PlacesConfig;
use crate::error::PlannerError;
use crate::models::{Coordinates, Place};
use crate::Result;

/// A place search capability.
///
/// Fails with `Unavailable` or `Timeout`; implementations may answer from a
/// fixed catalog when no real backend is configured.
#[async_trait]
pub trait PlaceLookupService: Send + Sync {
    async fn search(
        &self,
        location: &str,
        category: &str,
        radius_meters: u32,
    ) -> Result<Vec<Place>>;
}

/// Google Places text-search client
pub struct GooglePlacesClient {
    client: ClientWithMiddleware,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    name: String,
    rating: Option<f32>,
    formatted_address: Option<String>,
    geometry: Option<Geometry>,
    place_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Option<GeometryLocation>,
}

#[derive(Debug, Deserialize)]
struct GeometryLocation {
    lat: f64,
    lng: f64,
}

impl GooglePlacesClient {
    /// Create a client from configuration; `None` when no API key is set
    #[must_use]
    pub fn from_config(config: &PlacesConfig) -> Option<Self> {
        let api_key = config.api_key.clone()?;

        let inner = reqwest::Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .user_agent(concat!("TripWeaver/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(inner)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Some(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PlaceLookupService for GooglePlacesClient {
    async fn search(
        &self,
        location: &str,
        category: &str,
        radius_meters: u32,
    ) -> Result<Vec<Place>> {
        let query = format!("{} in {}", category.replace('_', " "), location);
        let url = format!(
            "{}/textsearch/json?query={}&radius={}&key={}",
            self.base_url,
            urlencoding::encode(&query),
            radius_meters,
            self.api_key
        );

        debug!(%location, %category, "querying places API");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(PlannerError::unavailable(format!(
                "places API error {status}"
            )));
        }

        let search: SearchResponse = response
            .json()
            .await
            .map_err(|e| PlannerError::invalid_response(format!("malformed places reply: {e}")))?;

        match search.status.as_str() {
            "OK" | "ZERO_RESULTS" => {}
            other => {
                return Err(PlannerError::unavailable(format!(
                    "places API status {other}"
                )));
            }
        }

        let places: Vec<Place> = search
            .results
            .into_iter()
            .map(|result| result.into_place(location, category))
            .collect();

        info!(
            "found {} places for category {} in {}",
            places.len(),
            category,
            location
        );
        Ok(places)
    }
}

impl SearchResult {
    /// Convert an API result to the unified place model
    fn into_place(self, location: &str, category: &str) -> Place {
        let coordinates = self
            .geometry
            .and_then(|geometry| geometry.location)
            .map(|point| Coordinates {
                lat: point.lat,
                lng: point.lng,
            });

        Place {
            description: self.name.clone(),
            name: self.name,
            category: category.to_string(),
            rating: self.rating,
            address: self
                .formatted_address
                .unwrap_or_else(|| location.to_string()),
            coordinates,
            external_id: self.place_id.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_requires_api_key() {
        let config = PlacesConfig {
            api_key: None,
            base_url: "https://maps.googleapis.com/maps/api/place".to_string(),
            timeout_seconds: 30,
            max_retries: 3,
        };
        assert!(GooglePlacesClient::from_config(&config).is_none());
    }

    #[test]
    fn test_search_result_conversion() {
        let result = SearchResult {
            name: "Colosseum".to_string(),
            rating: Some(4.6),
            formatted_address: Some("Piazza del Colosseo, Rome".to_string()),
            geometry: Some(Geometry {
                location: Some(GeometryLocation {
                    lat: 41.8902,
                    lng: 12.4922,
                }),
            }),
            place_id: Some("ChIJrRMgU7ZhLxMRxAOFkC7I8Sg".to_string()),
        };

        let place = result.into_place("Rome, Italy", "tourist_attraction");
        assert_eq!(place.name, "Colosseum");
        assert_eq!(place.category, "tourist_attraction");
        assert_eq!(place.rating, Some(4.6));
        assert_eq!(place.address, "Piazza del Colosseo, Rome");
        assert_eq!(place.description, "Colosseum");
        assert!(place.coordinates.is_some());
    }

    #[test]
    fn test_search_result_conversion_defaults() {
        let result = SearchResult {
            name: "Nameless Corner".to_string(),
            rating: None,
            formatted_address: None,
            geometry: None,
            place_id: None,
        };

        let place = result.into_place("Rome, Italy", "cafe");
        assert_eq!(place.address, "Rome, Italy");
        assert_eq!(place.rating, None);
        assert!(place.coordinates.is_none());
        assert!(place.external_id.is_empty());
    }

    #[test]
    fn test_search_response_parsing() {
        let payload = r#"{
            "status": "OK",
            "results": [
                {"name": "Pantheon", "rating": 4.5, "formatted_address": "Piazza della Rotonda"}
            ]
        }"#;
        let response: SearchResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(response.status, "OK");
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].name, "Pantheon");
    }
}
