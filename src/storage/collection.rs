//! Typed access to a named collection
//!
//! [`Collection`] maps records to documents and back, records store metrics,
//! and hosts the batched join used to resolve [`Reference`] fields.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

use super::{DeleteResult, Document, DocumentStore, Filter, UpdateResult, ID_FIELD};
use crate::core::error::{Result, StorageError};
use crate::core::types::{Id, Reference};
use crate::system::metrics::Metrics;

/// A model persisted in its own collection
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection name
    const COLLECTION: &'static str;

    /// Fields other than `_id` that hold ObjectIds in MongoDB
    const OBJECT_ID_FIELDS: &'static [&'static str] = &[];

    /// Fields that hold BSON dates in MongoDB
    const DATE_FIELDS: &'static [&'static str] = &[];

    /// The record's `_id`
    fn id(&self) -> &Id;
}

impl<T: Record> Reference<T> {
    /// Identifier of the referenced record, whatever the join state
    pub fn id(&self) -> &Id {
        match self {
            Reference::Id(id) | Reference::Dangling(id) => id,
            Reference::Resolved(record) => record.id(),
        }
    }
}

/// Typed handle on one collection of a shared store
pub struct Collection<T> {
    store: Arc<dyn DocumentStore>,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _record: PhantomData,
        }
    }
}

impl<T: Record> Collection<T> {
    /// Bind a collection to a store
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// Insert a record and return it as stored
    pub async fn insert(&self, record: T) -> Result<T> {
        let metrics = &Metrics::global().store;
        let timer = metrics.time("insert");
        let document = to_document(&record)?;
        self.store.insert_one(T::COLLECTION, document).await?;
        timer.finish();

        metrics
            .documents_created
            .with_label_values(&[T::COLLECTION])
            .inc();
        debug!("Inserted {} into {}", record.id(), T::COLLECTION);
        Ok(record)
    }

    /// All records matching the filter
    pub async fn find(&self, filter: &Filter) -> Result<Vec<T>> {
        let timer = Metrics::global().store.time("find");
        let documents = self.store.find(T::COLLECTION, filter).await?;
        timer.finish();
        documents.into_iter().map(from_document).collect()
    }

    /// First record matching the filter
    pub async fn find_one(&self, filter: &Filter) -> Result<Option<T>> {
        let timer = Metrics::global().store.time("find_one");
        let document = self.store.find_one(T::COLLECTION, filter).await?;
        timer.finish();
        document.map(from_document).transpose()
    }

    /// Record with the given id
    pub async fn find_by_id(&self, id: &Id) -> Result<Option<T>> {
        self.find_one(&Filter::by_id(id)).await
    }

    /// Records with any of the given ids, keyed by id
    pub async fn find_by_ids(&self, ids: &[Id]) -> Result<HashMap<Id, T>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let records = self.find(&Filter::new().any_of(ID_FIELD, ids)).await?;
        Ok(records
            .into_iter()
            .map(|record| (*record.id(), record))
            .collect())
    }

    /// Set fields on the record with the given id. The `_id` is never changed.
    pub async fn update_by_id(&self, id: &Id, mut changes: Document) -> Result<UpdateResult> {
        changes.remove(ID_FIELD);
        let timer = Metrics::global().store.time("update_one");
        let result = self
            .store
            .update_one(T::COLLECTION, &Filter::by_id(id), changes)
            .await?;
        timer.finish();
        Ok(result)
    }

    /// Remove the first record matching the filter
    pub async fn delete_one(&self, filter: &Filter) -> Result<DeleteResult> {
        let metrics = &Metrics::global().store;
        let timer = metrics.time("delete_one");
        let result = self.store.delete_one(T::COLLECTION, filter).await?;
        timer.finish();

        metrics
            .documents_deleted
            .with_label_values(&[T::COLLECTION])
            .inc_by(result.deleted_count);
        Ok(result)
    }

    /// Number of records matching the filter
    pub async fn count(&self, filter: &Filter) -> Result<u64> {
        let timer = Metrics::global().store.time("count");
        let count = self.store.count(T::COLLECTION, filter).await?;
        timer.finish();
        Ok(count)
    }
}

/// Resolve references against `collection` with a single batched lookup.
///
/// References that are already resolved are left alone. Those whose target
/// is missing become [`Reference::Dangling`].
pub async fn resolve<'a, T, I>(collection: &Collection<T>, references: I) -> Result<()>
where
    T: Record,
    I: IntoIterator<Item = &'a mut Reference<T>>,
{
    let mut pending: Vec<&'a mut Reference<T>> = references
        .into_iter()
        .filter(|reference| !reference.is_resolved())
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let mut ids: Vec<Id> = pending.iter().map(|reference| *reference.id()).collect();
    ids.sort();
    ids.dedup();

    let found = collection.find_by_ids(&ids).await?;
    for reference in pending.iter_mut() {
        let id = *reference.id();
        **reference = match found.get(&id) {
            Some(record) => Reference::Resolved(Box::new(record.clone())),
            None => Reference::Dangling(id),
        };
    }
    Ok(())
}

fn to_document<T: Record>(record: &T) -> Result<Document> {
    match serde_json::to_value(record) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(_) => Err(invalid_document::<T>("record is not a JSON object").into()),
        Err(e) => Err(invalid_document::<T>(e.to_string()).into()),
    }
}

fn from_document<T: Record>(document: Document) -> Result<T> {
    serde_json::from_value(Value::Object(document))
        .map_err(|e| invalid_document::<T>(e.to_string()).into())
}

fn invalid_document<T: Record>(reason: impl Into<String>) -> StorageError {
    StorageError::InvalidDocument {
        collection: T::COLLECTION.to_string(),
        reason: reason.into(),
    }
}
