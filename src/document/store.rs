//! DocumentStore - Abstract identifier-keyed storage for documents.

use async_trait::async_trait;

use super::{DeleteOutcome, Document, DocumentId, StoreError, Stored};

/// Abstract CRUD storage for documents.
///
/// Identifiers are assigned by the store. The `DocumentRepository` wrapper
/// binds a document type so callers don't repeat the turbofish.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document. Returns the assigned identifier, or `None` if the
    /// store accepted the request without reporting one.
    async fn create<M: Document>(&self, document: &M) -> Result<Option<DocumentId>, StoreError>;

    /// Get a document by ID. Returns None if not found.
    async fn get<M: Document>(&self, id: &str) -> Result<Option<M>, StoreError>;

    /// Every document in the collection.
    async fn find<M: Document>(&self) -> Result<Vec<Stored<M>>, StoreError>;

    /// Overwrite an existing document. Returns None if the target does not exist.
    async fn replace<M: Document>(
        &self,
        id: &str,
        document: &M,
    ) -> Result<Option<DocumentId>, StoreError>;

    /// Delete a document by ID.
    async fn delete<M: Document>(&self, id: &str) -> Result<DeleteOutcome, StoreError>;
}
