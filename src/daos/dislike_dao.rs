//! Data access for dislikes

use super::{RelationshipDao, TuitDao};
use crate::core::error::Result;
use crate::models::{Dislike, Tuit};
use crate::storage::{DeleteResult, SharedStore};

/// Data access for the `dislikes` collection
#[derive(Clone)]
pub struct DislikeDao {
    dislikes: RelationshipDao<Dislike>,
    tuits: TuitDao,
}

impl DislikeDao {
    pub fn new(store: SharedStore, tuits: TuitDao) -> Self {
        Self {
            dislikes: RelationshipDao::new(store),
            tuits,
        }
    }

    pub async fn user_dislikes_tuit(&self, uid: &str, tid: &str) -> Result<Dislike> {
        self.dislikes.create(uid, tid).await
    }

    pub async fn user_undislikes_tuit(&self, uid: &str, tid: &str) -> Result<DeleteResult> {
        self.dislikes.delete(uid, tid).await
    }

    /// Dislikes of `tid`, users resolved
    pub async fn find_all_users_that_disliked_tuit(&self, tid: &str) -> Result<Vec<Dislike>> {
        self.dislikes.find_by_target(tid).await
    }

    /// Dislikes by `uid`, each tuit and its author resolved
    pub async fn find_all_tuits_disliked_by_user(&self, uid: &str) -> Result<Vec<Dislike>> {
        let mut dislikes = self.dislikes.find_by_source(uid).await?;
        let tuits: Vec<&mut Tuit> = dislikes
            .iter_mut()
            .filter_map(|dislike| dislike.tuit.resolved_mut())
            .collect();
        self.tuits.resolve_authors(tuits).await?;
        Ok(dislikes)
    }

    /// `uid`'s dislike of `tid`, matched on `dislikedBy`
    pub async fn find_user_dislikes_tuit(&self, uid: &str, tid: &str) -> Result<Option<Dislike>> {
        self.dislikes.find_one(uid, tid).await
    }

    pub async fn count_how_many_disliked_tuit(&self, tid: &str) -> Result<u64> {
        self.dislikes.count_by_target(tid).await
    }
}
