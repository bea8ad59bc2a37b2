//! One user following another

use serde::{Deserialize, Serialize};

use super::{Relationship, User};
use crate::core::types::{Id, Reference};
use crate::storage::Record;

/// `user_following` follows `user_followed`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Follow {
    #[serde(rename = "_id")]
    pub id: Id,
    pub user_following: Reference<User>,
    pub user_followed: Reference<User>,
}

impl Record for Follow {
    const COLLECTION: &'static str = "follows";
    const OBJECT_ID_FIELDS: &'static [&'static str] = &["userFollowing", "userFollowed"];

    fn id(&self) -> &Id {
        &self.id
    }
}

impl Relationship for Follow {
    type Source = User;
    type Target = User;

    const SOURCE_FIELD: &'static str = "userFollowing";
    const TARGET_FIELD: &'static str = "userFollowed";

    fn new(source: Id, target: Id) -> Self {
        Self {
            id: Id::new(),
            user_following: Reference::Id(source),
            user_followed: Reference::Id(target),
        }
    }

    fn source_mut(&mut self) -> &mut Reference<User> {
        &mut self.user_following
    }

    fn target_mut(&mut self) -> &mut Reference<User> {
        &mut self.user_followed
    }
}
