//! Data access for likes

use super::{RelationshipDao, TuitDao};
use crate::core::error::Result;
use crate::models::{Like, Tuit};
use crate::storage::{DeleteResult, SharedStore};

/// Data access for the `likes` collection
#[derive(Clone)]
pub struct LikeDao {
    likes: RelationshipDao<Like>,
    tuits: TuitDao,
}

impl LikeDao {
    pub fn new(store: SharedStore, tuits: TuitDao) -> Self {
        Self {
            likes: RelationshipDao::new(store),
            tuits,
        }
    }

    pub async fn user_likes_tuit(&self, uid: &str, tid: &str) -> Result<Like> {
        self.likes.create(uid, tid).await
    }

    /// Remove `uid`'s like of `tid`
    pub async fn user_unlikes_tuit(&self, uid: &str, tid: &str) -> Result<DeleteResult> {
        self.likes.delete(uid, tid).await
    }

    /// Likes of `tid`, likers resolved
    pub async fn find_all_users_that_liked_tuit(&self, tid: &str) -> Result<Vec<Like>> {
        self.likes.find_by_target(tid).await
    }

    /// Likes by `uid`, each tuit and its author resolved
    pub async fn find_all_tuits_liked_by_user(&self, uid: &str) -> Result<Vec<Like>> {
        let mut likes = self.likes.find_by_source(uid).await?;
        let tuits: Vec<&mut Tuit> = likes
            .iter_mut()
            .filter_map(|like| like.tuit.resolved_mut())
            .collect();
        self.tuits.resolve_authors(tuits).await?;
        Ok(likes)
    }

    pub async fn find_user_likes_tuit(&self, uid: &str, tid: &str) -> Result<Option<Like>> {
        self.likes.find_one(uid, tid).await
    }

    pub async fn count_how_many_liked_tuit(&self, tid: &str) -> Result<u64> {
        self.likes.count_by_target(tid).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Id;
    use crate::storage::MemStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_like_count_and_lookup() {
        let store: SharedStore = Arc::new(MemStore::new());
        let likes = LikeDao::new(store.clone(), TuitDao::new(store));
        let (u1, u2, tid) = (Id::new().to_hex(), Id::new().to_hex(), Id::new().to_hex());

        likes.user_likes_tuit(&u1, &tid).await.unwrap();
        likes.user_likes_tuit(&u2, &tid).await.unwrap();
        assert_eq!(likes.count_how_many_liked_tuit(&tid).await.unwrap(), 2);
        assert!(likes.find_user_likes_tuit(&u1, &tid).await.unwrap().is_some());

        likes.user_unlikes_tuit(&u1, &tid).await.unwrap();
        assert!(likes.find_user_likes_tuit(&u1, &tid).await.unwrap().is_none());
        assert_eq!(
            likes.find_all_users_that_liked_tuit(&tid).await.unwrap().len(),
            1
        );
    }

    fn assert_send<T: Send>(_: T) {}

    #[test]
    fn test_nested_author_lookup_is_send() {
        let store: SharedStore = Arc::new(MemStore::new());
        let dao = LikeDao::new(store.clone(), TuitDao::new(store));
        assert_send(dao.find_all_tuits_liked_by_user("6160c0d4e1d2a3b4c5d6e7f8"));
    }
}
