//! Generic data access for join documents
//!
//! Follows, likes, dislikes, unlikes and bookmarks all store a pair of ids
//! and are queried from either end. [`RelationshipDao`] implements that once;
//! the per-resource DAOs wrap it under their own method names.

use tracing::debug;

use crate::core::error::Result;
use crate::core::types::Id;
use crate::models::Relationship;
use crate::storage::{resolve, Collection, DeleteResult, Filter, SharedStore};

/// Data access for one relationship collection
pub struct RelationshipDao<R: Relationship> {
    relationships: Collection<R>,
    sources: Collection<R::Source>,
    targets: Collection<R::Target>,
}

impl<R: Relationship> Clone for RelationshipDao<R> {
    fn clone(&self) -> Self {
        Self {
            relationships: self.relationships.clone(),
            sources: self.sources.clone(),
            targets: self.targets.clone(),
        }
    }
}

impl<R: Relationship> RelationshipDao<R> {
    /// Bind the DAO to a store
    pub fn new(store: SharedStore) -> Self {
        Self {
            relationships: Collection::new(store.clone()),
            sources: Collection::new(store.clone()),
            targets: Collection::new(store),
        }
    }

    fn pair_filter(source: &Id, target: &Id) -> Filter {
        Filter::new()
            .eq(R::SOURCE_FIELD, source)
            .eq(R::TARGET_FIELD, target)
    }

    /// Record that `source` relates to `target`.
    ///
    /// No duplicate check: relating the same pair twice stores two documents.
    pub async fn create(&self, source: &str, target: &str) -> Result<R> {
        let relationship = R::new(Id::parse(source)?, Id::parse(target)?);
        debug!(
            "Creating {} {} -> {}",
            R::COLLECTION,
            source,
            target
        );
        self.relationships.insert(relationship).await
    }

    /// Remove the first document linking `source` to `target`
    pub async fn delete(&self, source: &str, target: &str) -> Result<DeleteResult> {
        let filter = Self::pair_filter(&Id::parse(source)?, &Id::parse(target)?);
        self.relationships.delete_one(&filter).await
    }

    /// The first document linking `source` to `target`, unresolved
    pub async fn find_one(&self, source: &str, target: &str) -> Result<Option<R>> {
        let filter = Self::pair_filter(&Id::parse(source)?, &Id::parse(target)?);
        self.relationships.find_one(&filter).await
    }

    /// Every document whose source is `source`, with the targets resolved
    pub async fn find_by_source(&self, source: &str) -> Result<Vec<R>> {
        let filter = Filter::new().eq(R::SOURCE_FIELD, Id::parse(source)?);
        let mut relationships = self.relationships.find(&filter).await?;
        resolve(
            &self.targets,
            relationships.iter_mut().map(|relationship| relationship.target_mut()),
        )
        .await?;
        Ok(relationships)
    }

    /// Every document whose target is `target`, with the sources resolved
    pub async fn find_by_target(&self, target: &str) -> Result<Vec<R>> {
        let filter = Filter::new().eq(R::TARGET_FIELD, Id::parse(target)?);
        let mut relationships = self.relationships.find(&filter).await?;
        resolve(
            &self.sources,
            relationships.iter_mut().map(|relationship| relationship.source_mut()),
        )
        .await?;
        Ok(relationships)
    }

    /// How many documents point at `target`
    pub async fn count_by_target(&self, target: &str) -> Result<u64> {
        let filter = Filter::new().eq(R::TARGET_FIELD, Id::parse(target)?);
        self.relationships.count(&filter).await
    }
}
