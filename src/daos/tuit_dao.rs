//! Data access for tuits

use crate::core::error::Result;
use crate::core::types::Id;
use crate::models::{NewTuit, Tuit, TuitChanges, User};
use crate::storage::{
    into_document, resolve, Collection, DeleteResult, Filter, SharedStore, UpdateResult,
};

/// Data access for the `tuits` collection
#[derive(Clone)]
pub struct TuitDao {
    tuits: Collection<Tuit>,
    users: Collection<User>,
}

impl TuitDao {
    pub fn new(store: SharedStore) -> Self {
        Self {
            tuits: Collection::new(store.clone()),
            users: Collection::new(store),
        }
    }

    /// Post a tuit as user `uid`
    pub async fn create_tuit(&self, uid: &str, body: NewTuit) -> Result<Tuit> {
        let tuit = Tuit::new(Id::parse(uid)?, body.tuit);
        self.tuits.insert(tuit).await
    }

    /// Every tuit, authors unresolved
    pub async fn find_all_tuits(&self) -> Result<Vec<Tuit>> {
        self.tuits.find(&Filter::new()).await
    }

    /// The tuit with id `tid` and its author
    pub async fn find_tuit_by_id(&self, tid: &str) -> Result<Option<Tuit>> {
        let mut tuit = self.tuits.find_by_id(&Id::parse(tid)?).await?;
        self.resolve_authors(tuit.iter_mut()).await?;
        Ok(tuit)
    }

    /// Every tuit posted by `uid`
    pub async fn find_tuits_by_user(&self, uid: &str) -> Result<Vec<Tuit>> {
        let filter = Filter::new().eq("postedBy", Id::parse(uid)?);
        self.tuits.find(&filter).await
    }

    pub async fn update_tuit(&self, tid: &str, changes: TuitChanges) -> Result<UpdateResult> {
        let id = Id::parse(tid)?;
        self.tuits.update_by_id(&id, into_document(&changes)?).await
    }

    pub async fn delete_tuit(&self, tid: &str) -> Result<DeleteResult> {
        self.tuits.delete_one(&Filter::by_id(&Id::parse(tid)?)).await
    }

    /// Fill in `postedBy` on each tuit with one lookup
    pub async fn resolve_authors<'a, I>(&self, tuits: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a mut Tuit>,
    {
        resolve(
            &self.users,
            tuits.into_iter().map(|tuit| &mut tuit.posted_by),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Reference;
    use crate::models::UserProfile;
    use crate::storage::MemStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_tuit_by_id_resolves_author() {
        let store: SharedStore = Arc::new(MemStore::new());
        let tuits = TuitDao::new(store.clone());
        let users: Collection<User> = Collection::new(store);
        let alice = users
            .insert(User::new(UserProfile {
                username: Some("alice".into()),
                ..Default::default()
            }))
            .await
            .unwrap();
        let uid = alice.id.to_hex();

        let tuit = tuits
            .create_tuit(&uid, NewTuit { tuit: "first!".into() })
            .await
            .unwrap();
        assert_eq!(tuit.posted_by, Reference::Id(alice.id));

        let found = tuits
            .find_tuit_by_id(&tuit.id.to_hex())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.posted_by.resolved(), Some(&alice));

        assert_eq!(tuits.find_tuits_by_user(&uid).await.unwrap().len(), 1);
        assert!(tuits
            .find_tuits_by_user(&Id::new().to_hex())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete_tuit() {
        let tuits = TuitDao::new(Arc::new(MemStore::new()));
        let tuit = tuits
            .create_tuit(&Id::new().to_hex(), NewTuit { tuit: "draft".into() })
            .await
            .unwrap();
        let tid = tuit.id.to_hex();

        let result = tuits
            .update_tuit(
                &tid,
                TuitChanges {
                    tuit: Some("final".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(result.modified_count, 1);
        let found = tuits.find_tuit_by_id(&tid).await.unwrap().unwrap();
        assert_eq!(found.tuit, "final");
        assert_eq!(found.posted_on, tuit.posted_on);

        assert_eq!(tuits.delete_tuit(&tid).await.unwrap().deleted_count, 1);
        assert_eq!(tuits.find_tuit_by_id(&tid).await.unwrap(), None);
        assert!(tuits.find_all_tuits().await.unwrap().is_empty());
    }
}
