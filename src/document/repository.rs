//! DocumentRepository - Typed accessor for document CRUD operations.

use std::marker::PhantomData;

use super::{DeleteOutcome, Document, DocumentId, DocumentStore, StoreError, Stored};

/// Typed repository wrapper for accessing documents of a specific type.
pub struct DocumentRepository<'a, S, M> {
    store: &'a S,
    _marker: PhantomData<M>,
}

impl<'a, S: DocumentStore, M: Document> DocumentRepository<'a, S, M> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Insert a new document, returning the store-assigned identifier.
    pub async fn create(&self, document: &M) -> Result<Option<DocumentId>, StoreError> {
        self.store.create(document).await
    }

    /// Get a document by ID.
    pub async fn get(&self, id: &str) -> Result<Option<M>, StoreError> {
        self.store.get::<M>(id).await
    }

    /// All documents in the collection.
    pub async fn find(&self) -> Result<Vec<Stored<M>>, StoreError> {
        self.store.find::<M>().await
    }

    /// Replace an existing document. None if it no longer exists.
    pub async fn replace(&self, id: &str, document: &M) -> Result<Option<DocumentId>, StoreError> {
        self.store.replace(id, document).await
    }

    /// Delete a document by ID.
    pub async fn delete(&self, id: &str) -> Result<DeleteOutcome, StoreError> {
        self.store.delete::<M>(id).await
    }
}

/// Extension trait for typed document access on any DocumentStore.
pub trait DocumentsExt: DocumentStore + Sized {
    /// Get a typed document repository.
    fn documents<M: Document>(&self) -> DocumentRepository<'_, Self, M> {
        DocumentRepository::new(self)
    }
}

impl<S: DocumentStore> DocumentsExt for S {}
