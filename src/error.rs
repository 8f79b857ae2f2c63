//! Error type for profile operations.

use std::error::Error;
use std::fmt;

use crate::document::StoreError;
use crate::geocoding::GeocodeError;

#[derive(Debug)]
pub enum ProfileError {
    /// No profile stored under this identifier.
    NotFound(String),
    /// The store accepted a create but reported no identifier.
    Creation,
    /// Document store failure.
    Store(StoreError),
    /// Coordinate lookup failure.
    Geocode(GeocodeError),
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::NotFound(id) => write!(f, "no github-profile for {} found", id),
            ProfileError::Creation => write!(f, "creation did not pass as expected"),
            ProfileError::Store(e) => write!(f, "store error: {}", e),
            ProfileError::Geocode(e) => write!(f, "geocoding error: {}", e),
        }
    }
}

impl Error for ProfileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ProfileError::Store(e) => Some(e),
            ProfileError::Geocode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for ProfileError {
    fn from(err: StoreError) -> Self {
        ProfileError::Store(err)
    }
}

impl From<GeocodeError> for ProfileError {
    fn from(err: GeocodeError) -> Self {
        ProfileError::Geocode(err)
    }
}

impl ProfileError {
    /// True for failures of the store or the geocoder rather than of the request.
    pub fn is_upstream(&self) -> bool {
        matches!(self, ProfileError::Store(_) | ProfileError::Geocode(_))
    }

    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            ProfileError::NotFound(_) => 404,
            ProfileError::Creation => 400,
            ProfileError::Store(_) => 502,
            ProfileError::Geocode(_) => 502,
        }
    }
}
