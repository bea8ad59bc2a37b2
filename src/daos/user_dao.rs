//! Data access for users

use crate::core::error::Result;
use crate::core::types::Id;
use crate::models::{User, UserProfile};
use crate::storage::{
    into_document, Collection, DeleteResult, Filter, SharedStore, UpdateResult,
};

/// Data access for the `users` collection
#[derive(Clone)]
pub struct UserDao {
    users: Collection<User>,
}

impl UserDao {
    pub fn new(store: SharedStore) -> Self {
        Self {
            users: Collection::new(store),
        }
    }

    /// Insert a new user
    pub async fn create_user(&self, profile: UserProfile) -> Result<User> {
        self.users.insert(User::new(profile)).await
    }

    /// Every user, in creation order
    pub async fn find_all_users(&self) -> Result<Vec<User>> {
        self.users.find(&Filter::new()).await
    }

    /// The user with id `uid`, if any
    pub async fn find_user_by_id(&self, uid: &str) -> Result<Option<User>> {
        self.users.find_by_id(&Id::parse(uid)?).await
    }

    /// Overwrite the fields present in `profile`
    pub async fn update_user(&self, uid: &str, profile: UserProfile) -> Result<UpdateResult> {
        let id = Id::parse(uid)?;
        self.users.update_by_id(&id, into_document(&profile)?).await
    }

    /// Remove the user. Their follows, tuits and messages are left in place.
    pub async fn delete_user(&self, uid: &str) -> Result<DeleteResult> {
        self.users.delete_one(&Filter::by_id(&Id::parse(uid)?)).await
    }
}
