//! InMemoryDocumentStore - HashMap-backed document store for testing and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use uuid::Uuid;

use super::{DeleteOutcome, Document, DocumentId, DocumentStore, StoreError, Stored};

/// In-memory document store backed by a HashMap.
///
/// Storage key is `"COLLECTION:id"`. Documents are kept as JSON bytes, so
/// every read hands out a fresh copy. Clone-friendly via Arc.
#[derive(Clone)]
pub struct InMemoryDocumentStore {
    storage: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDocumentStore {
    /// Create a new empty document store.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of documents across all collections.
    pub fn len(&self) -> usize {
        self.storage.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn make_key(collection: &str, id: &str) -> String {
        format!("{}:{}", collection, id)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, Vec<u8>>>, StoreError> {
        self.storage
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, Vec<u8>>>, StoreError> {
        self.storage
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn create<M: Document>(&self, document: &M) -> Result<Option<DocumentId>, StoreError> {
        let bytes = serde_json::to_vec(document)?;
        let id = Uuid::new_v4().to_string();

        self.write()?.insert(Self::make_key(M::COLLECTION, &id), bytes);

        Ok(Some(DocumentId::new(id)))
    }

    async fn get<M: Document>(&self, id: &str) -> Result<Option<M>, StoreError> {
        let storage = self.read()?;

        match storage.get(&Self::make_key(M::COLLECTION, id)) {
            Some(bytes) => Ok(Some(serde_json::from_slice(bytes)?)),
            None => Ok(None),
        }
    }

    async fn find<M: Document>(&self) -> Result<Vec<Stored<M>>, StoreError> {
        let storage = self.read()?;

        let prefix = format!("{}:", M::COLLECTION);
        let mut results = Vec::new();

        for (key, bytes) in storage.iter() {
            if let Some(id) = key.strip_prefix(&prefix) {
                results.push(Stored {
                    id: id.to_string(),
                    data: serde_json::from_slice(bytes)?,
                });
            }
        }

        Ok(results)
    }

    async fn replace<M: Document>(
        &self,
        id: &str,
        document: &M,
    ) -> Result<Option<DocumentId>, StoreError> {
        let bytes = serde_json::to_vec(document)?;
        let mut storage = self.write()?;

        match storage.get_mut(&Self::make_key(M::COLLECTION, id)) {
            Some(slot) => {
                *slot = bytes;
                Ok(Some(DocumentId::new(id)))
            }
            None => Ok(None),
        }
    }

    async fn delete<M: Document>(&self, id: &str) -> Result<DeleteOutcome, StoreError> {
        let removed = self.write()?.remove(&Self::make_key(M::COLLECTION, id));

        Ok(DeleteOutcome {
            deleted: removed.is_some(),
        })
    }
}
