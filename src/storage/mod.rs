//! Storage layer for the Tuiter backend
//!
//! This module provides the storage abstraction that lets the service run on
//! different backends while every DAO talks to the same API. Documents are
//! JSON objects; collections are addressed by name.
//!
//! Two backends exist:
//! - [`MemStore`]: DashMap-backed, in-process, used by default and in tests
//! - [`MongoStore`]: MongoDB through the official driver

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::core::config::StorageType;
use crate::core::error::{Error, Result};
use crate::core::types::Id;

/// Typed collections and the reference join
pub mod collection;

/// Storage factory
pub mod factory;

/// In-memory backend
pub mod mem_store;

/// MongoDB backend
pub mod mongo_store;

pub use collection::{resolve, Collection, Record};
pub use factory::create_store;
pub use mem_store::MemStore;
pub use mongo_store::MongoStore;

/// A stored document: a JSON object whose `_id` key holds its identifier
pub type Document = Map<String, Value>;

/// Store handle shared by every DAO for the process lifetime
pub type SharedStore = Arc<dyn DocumentStore>;

/// Name of the identifier field in every document
pub const ID_FIELD: &str = "_id";

/// Turn a serializable value (a partial update body, say) into a document
pub fn into_document<S: Serialize>(value: &S) -> Result<Document> {
    match serde_json::to_value(value)? {
        Value::Object(document) => Ok(document),
        other => Err(Error::internal(format!(
            "expected a JSON object, got {}",
            other
        ))),
    }
}

/// Outcome of a single-document delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    /// The backend acknowledged the write
    pub acknowledged: bool,
    /// Documents that matched the filter (at most one is considered)
    pub matched_count: u64,
    /// Documents actually removed
    pub deleted_count: u64,
}

impl DeleteResult {
    /// Result for a delete that removed `deleted_count` documents
    pub fn deleted(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            matched_count: deleted_count,
            deleted_count,
        }
    }
}

/// Outcome of a single-document update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    /// The backend acknowledged the write
    pub acknowledged: bool,
    /// Documents that matched the filter (at most one is considered)
    pub matched_count: u64,
    /// Documents whose content changed
    pub modified_count: u64,
}

/// A single clause of a [`Filter`]
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Field equals the value
    Eq(Value),
    /// Field equals one of the values
    In(Vec<Value>),
}

impl Condition {
    fn matches(&self, field: Option<&Value>) -> bool {
        // Absent fields compare as null, the same way the database treats them.
        let field = field.unwrap_or(&Value::Null);
        match self {
            Condition::Eq(value) => field == value,
            Condition::In(values) => values.iter().any(|value| value == field),
        }
    }
}

/// Conjunction of per-field conditions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<(String, Condition)>,
}

impl Filter {
    /// Filter matching every document
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter on a document identifier
    pub fn by_id(id: &Id) -> Self {
        Self::new().eq(ID_FIELD, id)
    }

    /// Require `field` to equal `value`
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.clauses.push((field.into(), Condition::Eq(value.into())));
        self
    }

    /// Require `field` to equal any of `values`
    pub fn any_of<V: Into<Value>>(
        mut self,
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        self.clauses.push((field.into(), Condition::In(values)));
        self
    }

    /// The clauses in insertion order
    pub fn clauses(&self) -> &[(String, Condition)] {
        &self.clauses
    }

    /// Check a document against every clause
    pub fn matches(&self, document: &Document) -> bool {
        self.clauses
            .iter()
            .all(|(field, condition)| condition.matches(document.get(field)))
    }
}

/// Trait for document storage implementations
///
/// Implementations are shared across all request tasks, so every method takes
/// `&self` and must be safe to call concurrently. Nothing above this trait
/// adds locking: two concurrent inserts of the same relationship both land.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Which backend this is
    fn storage_type(&self) -> StorageType;

    /// Insert a document into a collection
    ///
    /// # Arguments
    ///
    /// * `collection` - Target collection name
    /// * `document` - The document, including its `_id`
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The document was stored
    /// * `Err(Error::Storage)` - The backend rejected the write (for example a duplicate `_id`)
    async fn insert_one(&self, collection: &str, document: Document) -> Result<()>;

    /// All documents matching the filter, in storage order
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>>;

    /// The first document matching the filter
    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Document>>;

    /// Set the given fields on the first document matching the filter
    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        changes: Document,
    ) -> Result<UpdateResult>;

    /// Remove the first document matching the filter.
    ///
    /// Matching nothing is not an error; the result reports zero deletions.
    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<DeleteResult>;

    /// Number of documents matching the filter
    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64>;

    /// Check that the backend is reachable
    async fn ping(&self) -> Result<()>;
}
