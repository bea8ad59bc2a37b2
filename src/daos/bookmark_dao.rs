//! Data access for bookmarks

use super::RelationshipDao;
use crate::core::error::Result;
use crate::models::Bookmark;
use crate::storage::{DeleteResult, SharedStore};

/// Data access for the `bookmarks` collection
#[derive(Clone)]
pub struct BookmarkDao {
    bookmarks: RelationshipDao<Bookmark>,
}

impl BookmarkDao {
    pub fn new(store: SharedStore) -> Self {
        Self {
            bookmarks: RelationshipDao::new(store),
        }
    }

    pub async fn user_bookmarks_tuit(&self, uid: &str, tid: &str) -> Result<Bookmark> {
        self.bookmarks.create(uid, tid).await
    }

    pub async fn user_unbookmarks_tuit(&self, uid: &str, tid: &str) -> Result<DeleteResult> {
        self.bookmarks.delete(uid, tid).await
    }

    /// Bookmarks made by `uid`, tuits resolved
    pub async fn find_all_tuits_bookmarked_by_user(&self, uid: &str) -> Result<Vec<Bookmark>> {
        self.bookmarks.find_by_source(uid).await
    }
}
