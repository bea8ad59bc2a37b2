//! A user disliking a tuit

use serde::{Deserialize, Serialize};

use super::{Relationship, Tuit, User};
use crate::core::types::{Id, Reference};
use crate::storage::Record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dislike {
    #[serde(rename = "_id")]
    pub id: Id,
    pub tuit: Reference<Tuit>,
    pub disliked_by: Reference<User>,
}

impl Record for Dislike {
    const COLLECTION: &'static str = "dislikes";
    const OBJECT_ID_FIELDS: &'static [&'static str] = &["tuit", "dislikedBy"];

    fn id(&self) -> &Id {
        &self.id
    }
}

impl Relationship for Dislike {
    type Source = User;
    type Target = Tuit;

    const SOURCE_FIELD: &'static str = "dislikedBy";
    const TARGET_FIELD: &'static str = "tuit";

    fn new(source: Id, target: Id) -> Self {
        Self {
            id: Id::new(),
            tuit: Reference::Id(target),
            disliked_by: Reference::Id(source),
        }
    }

    fn source_mut(&mut self) -> &mut Reference<User> {
        &mut self.disliked_by
    }

    fn target_mut(&mut self) -> &mut Reference<Tuit> {
        &mut self.tuit
    }
}
