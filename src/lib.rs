mod config;
mod document;
mod error;
mod geocoding;
mod profile;

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
pub mod http;

pub use config::{Config, ConfigError, StoreBackend};
pub use document::{
    AstraConfig, AstraDocumentStore, DeleteOutcome, Document, DocumentId, DocumentRepository,
    DocumentStore, DocumentsExt, InMemoryDocumentStore, StoreError, Stored,
};
pub use error::ProfileError;
pub use geocoding::{CoordinateLookup, Coordinates, GeocodeError, GoogleGeocoder, DEFAULT_GOOGLE_BASE_URL};
pub use profile::{
    map_community_state, ActivityEvent, CommunityStats, GithubProfile, ProfileInput,
    ProfileService,
};
