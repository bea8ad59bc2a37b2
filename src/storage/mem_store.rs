//! In-memory document store backed by DashMap
//!
//! Each collection is a vector of documents in insertion order, so reads come
//! back in the order records were created, as they do from MongoDB without a
//! sort. Nothing is persisted across restarts.

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::trace;

use super::{DeleteResult, Document, DocumentStore, Filter, UpdateResult, ID_FIELD};
use crate::core::config::StorageType;
use crate::core::error::{Result, StorageError};

/// Simple in-memory storage: collection name to documents
#[derive(Debug, Default)]
pub struct MemStore {
    collections: DashMap<String, Vec<Document>>,
}

impl MemStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemStore {
    fn storage_type(&self) -> StorageType {
        StorageType::Memory
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<()> {
        let mut documents = self.collections.entry(collection.to_string()).or_default();

        if let Some(id) = document.get(ID_FIELD) {
            if documents.iter().any(|existing| existing.get(ID_FIELD) == Some(id)) {
                return Err(StorageError::DuplicateKey {
                    collection: collection.to_string(),
                    id: id.to_string(),
                }
                .into());
            }
        }

        documents.push(document);
        trace!("{} now holds {} documents", collection, documents.len());
        Ok(())
    }

    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>> {
        Ok(self
            .collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| filter.matches(document))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Document>> {
        Ok(self.collections.get(collection).and_then(|documents| {
            documents
                .iter()
                .find(|document| filter.matches(document))
                .cloned()
        }))
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        changes: Document,
    ) -> Result<UpdateResult> {
        let mut result = UpdateResult {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
        };

        let Some(mut documents) = self.collections.get_mut(collection) else {
            return Ok(result);
        };
        let Some(document) = documents.iter_mut().find(|document| filter.matches(document)) else {
            return Ok(result);
        };

        result.matched_count = 1;
        let mut modified = false;
        for (field, value) in changes {
            if field == ID_FIELD {
                continue;
            }
            if document.get(&field) != Some(&value) {
                document.insert(field, value);
                modified = true;
            }
        }
        if modified {
            result.modified_count = 1;
        }
        Ok(result)
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<DeleteResult> {
        let Some(mut documents) = self.collections.get_mut(collection) else {
            return Ok(DeleteResult::deleted(0));
        };

        match documents.iter().position(|document| filter.matches(document)) {
            Some(index) => {
                documents.remove(index);
                Ok(DeleteResult::deleted(1))
            }
            None => Ok(DeleteResult::deleted(0)),
        }
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64> {
        Ok(self
            .collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| filter.matches(document))
                    .count() as u64
            })
            .unwrap_or(0))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
