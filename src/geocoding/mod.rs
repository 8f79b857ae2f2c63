//! Geocoding - translate free-text locations into coordinates.

mod google;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use google::{GoogleGeocoder, DEFAULT_GOOGLE_BASE_URL};

/// A resolved geographic position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Capability to resolve a free-text location.
#[async_trait]
pub trait CoordinateLookup: Send + Sync {
    async fn fetch_coordinates(&self, location: &str) -> Result<Coordinates, GeocodeError>;
}

/// Error type for coordinate lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeocodeError {
    /// The provider knows no place by this name.
    NoResults(String),
    /// The provider refused the query (quota, key, malformed request).
    Rejected { status: String, message: String },
    /// Unexpected HTTP status from the provider.
    Status { status: u16, body: String },
    /// The request never produced a response.
    Transport(String),
    /// The response body could not be decoded.
    Serde(String),
}

impl fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeocodeError::NoResults(location) => write!(f, "no coordinates found for {}", location),
            GeocodeError::Rejected { status, message } => {
                write!(f, "geocoding rejected ({}): {}", status, message)
            }
            GeocodeError::Status { status, body } => {
                write!(f, "geocoding service answered {}: {}", status, body)
            }
            GeocodeError::Transport(msg) => write!(f, "geocoding service unreachable: {}", msg),
            GeocodeError::Serde(msg) => write!(f, "geocoding response malformed: {}", msg),
        }
    }
}

impl std::error::Error for GeocodeError {}

impl From<reqwest::Error> for GeocodeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GeocodeError::Serde(err.to_string())
        } else {
            GeocodeError::Transport(err.to_string())
        }
    }
}
