//! Documents - identifier-keyed records persisted in a document database.
//!
//! A document store assigns an opaque identifier on create and offers
//! get / find / replace / delete by that identifier. Misses are explicit
//! `None` values, never sentinel nulls.
//!
//! ## Example
//!
//! ```ignore
//! use github_profiles::{Document, DocumentsExt, InMemoryDocumentStore};
//!
//! #[derive(Serialize, Deserialize, Clone)]
//! struct Note {
//!     pub text: String,
//! }
//!
//! impl Document for Note {
//!     const COLLECTION: &'static str = "notes";
//! }
//!
//! let store = InMemoryDocumentStore::new();
//! let id = store.documents::<Note>().create(&note).await?;
//! let loaded = store.documents::<Note>().get(&id.unwrap().document_id).await?;
//! ```

mod astra;
mod in_memory;
mod repository;
mod store;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;

/// Trait for types that can be stored as documents.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// The collection this document type lives in.
    /// Maps to a collection in Astra, a key prefix in the in-memory store.
    const COLLECTION: &'static str;
}

/// A document together with the identifier the store assigned to it.
///
/// Serializes flat: `{ "id": "...", ...document fields }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stored<T> {
    pub id: String,
    #[serde(flatten)]
    pub data: T,
}

/// Acknowledgement returned by create and replace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentId {
    pub document_id: String,
}

impl DocumentId {
    pub fn new(document_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
        }
    }
}

/// Result of a delete call. `deleted` is true only when the store removed a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOutcome {
    pub deleted: bool,
}

/// Error type for document store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The request never produced a response (connect, TLS, timeout).
    Transport(String),
    /// The store answered with an unexpected status.
    Status { status: u16, body: String },
    /// Serialization/deserialization error.
    Serde(String),
    /// Storage-level error.
    Storage(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Transport(msg) => write!(f, "document store unreachable: {}", msg),
            StoreError::Status { status, body } => {
                write!(f, "document store answered {}: {}", status, body)
            }
            StoreError::Serde(msg) => write!(f, "document serialization error: {}", msg),
            StoreError::Storage(msg) => write!(f, "document storage error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err.to_string())
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            StoreError::Serde(err.to_string())
        } else {
            StoreError::Transport(err.to_string())
        }
    }
}

pub use astra::{AstraConfig, AstraDocumentStore};
pub use in_memory::InMemoryDocumentStore;
pub use repository::{DocumentRepository, DocumentsExt};
pub use store::DocumentStore;
