//! Profile records and the request body used to create and update them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::community_stats::CommunityStats;
use crate::document::Document;
use crate::geocoding::Coordinates;

/// A tracked GitHub account's public metadata plus its activity aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followers: Option<u64>,
    /// Repository references, kept as the caller sent them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repos: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinates>,
    #[serde(default)]
    pub community_stats: CommunityStats,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

impl Document for GithubProfile {
    const COLLECTION: &'static str = "github_profiles";
}

/// One unit of community activity, e.g. `{ "kind": "commit" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub kind: String,
    /// Amount to add; one when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<u64>,
}

impl ActivityEvent {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            magnitude: None,
        }
    }

    pub fn with_magnitude(kind: impl Into<String>, magnitude: u64) -> Self {
        Self {
            kind: kind.into(),
            magnitude: Some(magnitude),
        }
    }
}

/// Body accepted by create and update. Every field is optional.
///
/// `location` is free text; it is geocoded before anything is stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub repos: Option<Vec<Value>>,
    #[serde(default)]
    pub followers: Option<u64>,
    #[serde(default)]
    pub blog: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub event: Option<ActivityEvent>,
}
