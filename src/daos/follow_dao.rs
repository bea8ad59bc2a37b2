//! Data access for follows

use super::RelationshipDao;
use crate::core::error::Result;
use crate::models::Follow;
use crate::storage::{DeleteResult, SharedStore};

/// Data access for the `follows` collection
#[derive(Clone)]
pub struct FollowDao {
    follows: RelationshipDao<Follow>,
}

impl FollowDao {
    pub fn new(store: SharedStore) -> Self {
        Self {
            follows: RelationshipDao::new(store),
        }
    }

    /// `uid` starts following `fid`
    pub async fn user_follows_user(&self, uid: &str, fid: &str) -> Result<Follow> {
        self.follows.create(uid, fid).await
    }

    /// `uid` stops following `fid`
    pub async fn user_unfollows_user(&self, uid: &str, fid: &str) -> Result<DeleteResult> {
        self.follows.delete(uid, fid).await
    }

    /// Follows where `uid` is the follower, followed users resolved
    pub async fn find_all_users_followed_by_user(&self, uid: &str) -> Result<Vec<Follow>> {
        self.follows.find_by_source(uid).await
    }

    /// Follows where `uid` is followed, followers resolved
    pub async fn find_all_users_following_user(&self, uid: &str) -> Result<Vec<Follow>> {
        self.follows.find_by_target(uid).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Id;
    use crate::storage::MemStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_unfollow_removes_followed_user() {
        let follows = FollowDao::new(Arc::new(MemStore::new()));
        let (u1, u2, u3) = (Id::new().to_hex(), Id::new().to_hex(), Id::new().to_hex());

        follows.user_follows_user(&u1, &u2).await.unwrap();
        follows.user_follows_user(&u1, &u3).await.unwrap();
        assert_eq!(
            follows.find_all_users_followed_by_user(&u1).await.unwrap().len(),
            2
        );

        let result = follows.user_unfollows_user(&u1, &u2).await.unwrap();
        assert_eq!(result.deleted_count, 1);

        let remaining = follows.find_all_users_followed_by_user(&u1).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].user_followed.id().to_hex(), u3);
        assert!(follows
            .find_all_users_following_user(&u2)
            .await
            .unwrap()
            .is_empty());
    }
}
