//! Data access for unlikes

use super::{RelationshipDao, TuitDao};
use crate::core::error::Result;
use crate::models::{Tuit, Unlike};
use crate::storage::{DeleteResult, SharedStore};

/// Data access for the `unlikes` collection
#[derive(Clone)]
pub struct UnlikeDao {
    unlikes: RelationshipDao<Unlike>,
    tuits: TuitDao,
}

impl UnlikeDao {
    pub fn new(store: SharedStore, tuits: TuitDao) -> Self {
        Self {
            unlikes: RelationshipDao::new(store),
            tuits,
        }
    }

    pub async fn user_unlikes_tuit(&self, uid: &str, tid: &str) -> Result<Unlike> {
        self.unlikes.create(uid, tid).await
    }

    /// Withdraw `uid`'s unlike of `tid`
    pub async fn user_undoes_unlike(&self, uid: &str, tid: &str) -> Result<DeleteResult> {
        self.unlikes.delete(uid, tid).await
    }

    pub async fn find_all_users_that_unliked_tuit(&self, tid: &str) -> Result<Vec<Unlike>> {
        self.unlikes.find_by_target(tid).await
    }

    /// Unlikes by `uid`, each tuit and its author resolved
    pub async fn find_all_tuits_unliked_by_user(&self, uid: &str) -> Result<Vec<Unlike>> {
        let mut unlikes = self.unlikes.find_by_source(uid).await?;
        let tuits: Vec<&mut Tuit> = unlikes
            .iter_mut()
            .filter_map(|unlike| unlike.tuit.resolved_mut())
            .collect();
        self.tuits.resolve_authors(tuits).await?;
        Ok(unlikes)
    }

    pub async fn find_user_unlikes_tuit(&self, uid: &str, tid: &str) -> Result<Option<Unlike>> {
        self.unlikes.find_one(uid, tid).await
    }

    pub async fn count_how_many_unliked_tuit(&self, tid: &str) -> Result<u64> {
        self.unlikes.count_by_target(tid).await
    }
}
