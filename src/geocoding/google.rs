//! Google Maps Geocoding API client.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::{CoordinateLookup, Coordinates, GeocodeError};

pub const DEFAULT_GOOGLE_BASE_URL: &str = "https://maps.googleapis.com";

/// Resolves locations through `GET /maps/api/geocode/json`.
#[derive(Clone)]
pub struct GoogleGeocoder {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Deserialize)]
struct Geometry {
    location: Coordinates,
}

impl GoogleGeocoder {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_GOOGLE_BASE_URL, api_key)
    }

    /// Point the client at another host (proxies, local fakes).
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/maps/api/geocode/json",
            self.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl CoordinateLookup for GoogleGeocoder {
    async fn fetch_coordinates(&self, location: &str) -> Result<Coordinates, GeocodeError> {
        let response = self
            .client
            .get(self.endpoint())
            .query(&[("address", location), ("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let GeocodeResponse {
            status: api_status,
            error_message,
            results,
        } = response.json().await?;

        match api_status.as_str() {
            "OK" => results
                .into_iter()
                .next()
                .map(|result| {
                    debug!(location, "geocoded");
                    result.geometry.location
                })
                .ok_or_else(|| GeocodeError::NoResults(location.to_string())),
            "ZERO_RESULTS" => Err(GeocodeError::NoResults(location.to_string())),
            other => Err(GeocodeError::Rejected {
                status: other.to_string(),
                message: error_message.unwrap_or_default(),
            }),
        }
    }
}
