//! A user bookmarking a tuit

use serde::{Deserialize, Serialize};

use super::{Relationship, Tuit, User};
use crate::core::types::{Id, Reference};
use crate::storage::Record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    #[serde(rename = "_id")]
    pub id: Id,
    pub tuit: Reference<Tuit>,
    pub user: Reference<User>,
}

impl Record for Bookmark {
    const COLLECTION: &'static str = "bookmarks";
    const OBJECT_ID_FIELDS: &'static [&'static str] = &["user", "tuit"];

    fn id(&self) -> &Id {
        &self.id
    }
}

impl Relationship for Bookmark {
    type Source = User;
    type Target = Tuit;

    const SOURCE_FIELD: &'static str = "user";
    const TARGET_FIELD: &'static str = "tuit";

    fn new(source: Id, target: Id) -> Self {
        Self {
            id: Id::new(),
            tuit: Reference::Id(target),
            user: Reference::Id(source),
        }
    }

    fn source_mut(&mut self) -> &mut Reference<User> {
        &mut self.user
    }

    fn target_mut(&mut self) -> &mut Reference<Tuit> {
        &mut self.tuit
    }
}
