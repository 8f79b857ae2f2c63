//! ProfileService - create, read, update and delete GitHub profiles.
//!
//! Every operation is a short chain of awaited calls: at most one coordinate
//! lookup and one or two store calls. Nothing is retried and no write is
//! issued after a failed lookup.
//!
//! ## Example
//!
//! ```ignore
//! use github_profiles::{GoogleGeocoder, InMemoryDocumentStore, ProfileInput, ProfileService};
//!
//! let service = ProfileService::new(InMemoryDocumentStore::new(), GoogleGeocoder::new(key));
//! let id = service
//!     .create(ProfileInput {
//!         username: Some("ada".into()),
//!         location: Some("London".into()),
//!         ..Default::default()
//!     })
//!     .await?;
//! let profile = service.find_one(&id.document_id).await?;
//! ```

use chrono::Utc;
use tracing::{debug, info, warn};

use super::community_stats::{map_community_state, CommunityStats};
use super::model::{GithubProfile, ProfileInput};
use super::supplied::supplied;
use crate::document::{DeleteOutcome, DocumentId, DocumentStore, DocumentsExt, Stored};
use crate::error::ProfileError;
use crate::geocoding::{CoordinateLookup, Coordinates};

/// Profile operations over a document store and a coordinate lookup.
pub struct ProfileService<S, G> {
    store: S,
    geocoder: G,
}

impl<S: DocumentStore, G: CoordinateLookup> ProfileService<S, G> {
    pub fn new(store: S, geocoder: G) -> Self {
        Self { store, geocoder }
    }

    /// Get a reference to the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get a reference to the coordinate lookup.
    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// Build and persist a new profile. Returns the store-assigned id.
    pub async fn create(&self, body: ProfileInput) -> Result<DocumentId, ProfileError> {
        let profile = self.build_profile(body).await?;

        let created = self.store.documents::<GithubProfile>().create(&profile).await?;
        let id = created.ok_or(ProfileError::Creation)?;

        info!(id = %id.document_id, "github profile created");
        Ok(id)
    }

    /// All stored profiles. Store failures yield an empty list.
    pub async fn find_all(&self) -> Vec<Stored<GithubProfile>> {
        match self.store.documents::<GithubProfile>().find().await {
            Ok(profiles) => profiles,
            Err(e) => {
                warn!(error = %e, "listing github profiles failed, returning none");
                Vec::new()
            }
        }
    }

    /// One profile by id.
    pub async fn find_one(&self, id: &str) -> Result<Stored<GithubProfile>, ProfileError> {
        let profile = self
            .store
            .documents::<GithubProfile>()
            .get(id)
            .await?
            .ok_or_else(|| ProfileError::NotFound(id.to_string()))?;

        Ok(Stored {
            id: id.to_string(),
            data: profile,
        })
    }

    /// Merge `body` into the stored profile and write the whole record back.
    ///
    /// Fields that are absent, empty strings or zero are left as stored.
    pub async fn update(&self, id: &str, body: ProfileInput) -> Result<DocumentId, ProfileError> {
        let profiles = self.store.documents::<GithubProfile>();

        let mut profile = profiles
            .get(id)
            .await?
            .ok_or_else(|| ProfileError::NotFound(id.to_string()))?;

        if let Some(username) = supplied(body.username) {
            profile.username = Some(username);
        }
        if let Some(bio) = supplied(body.bio) {
            profile.bio = Some(bio);
        }
        if let Some(avatar_url) = supplied(body.avatar_url) {
            profile.avatar_url = Some(avatar_url);
        }
        if let Some(repos) = supplied(body.repos) {
            profile.repos = Some(repos);
        }
        if let Some(event) = supplied(body.event) {
            profile.community_stats = map_community_state(&event, &profile.community_stats);
        }
        if let Some(followers) = supplied(body.followers) {
            profile.followers = Some(followers);
        }
        if let Some(organization) = supplied(body.organization) {
            profile.organization = Some(organization);
        }
        if let Some(blog) = supplied(body.blog) {
            profile.blog = Some(blog);
        }
        if let Some(location) = supplied(body.location) {
            profile.location = Some(self.resolve(&location).await?);
        }

        // createdOn may come from a writer whose clock runs ahead of ours.
        profile.updated_on = Utc::now().max(profile.created_on);

        let replaced = profiles
            .replace(id, &profile)
            .await?
            .ok_or_else(|| ProfileError::NotFound(id.to_string()))?;

        debug!(id, "github profile updated");
        Ok(replaced)
    }

    /// Delete a profile.
    ///
    /// `Ok(None)` means the store did not confirm the delete; only
    /// `Ok(Some(_))` is a success.
    pub async fn remove(&self, id: &str) -> Result<Option<DeleteOutcome>, ProfileError> {
        let profiles = self.store.documents::<GithubProfile>();

        if profiles.get(id).await?.is_none() {
            return Err(ProfileError::NotFound(id.to_string()));
        }

        let outcome = profiles.delete(id).await?;
        if !outcome.deleted {
            warn!(id, "delete of github profile was not confirmed");
            return Ok(None);
        }

        info!(id, "github profile deleted");
        Ok(Some(outcome))
    }

    async fn build_profile(&self, body: ProfileInput) -> Result<GithubProfile, ProfileError> {
        let now = Utc::now();

        let community_stats = match supplied(body.event) {
            Some(event) => map_community_state(&event, &CommunityStats::default()),
            None => CommunityStats::default(),
        };

        let location = match supplied(body.location) {
            Some(location) => Some(self.resolve(&location).await?),
            None => None,
        };

        Ok(GithubProfile {
            username: body.username,
            bio: body.bio,
            avatar_url: body.avatar_url,
            blog: body.blog,
            organization: body.organization,
            followers: body.followers,
            repos: body.repos,
            location,
            community_stats,
            created_on: now,
            updated_on: now,
        })
    }

    async fn resolve(&self, location: &str) -> Result<Coordinates, ProfileError> {
        let coordinates = self.geocoder.fetch_coordinates(location).await?;
        debug!(location, lat = coordinates.lat, lng = coordinates.lng, "location resolved");
        Ok(coordinates)
    }
}
