//! A user unliking a tuit

use serde::{Deserialize, Serialize};

use super::{Relationship, Tuit, User};
use crate::core::types::{Id, Reference};
use crate::storage::Record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unlike {
    #[serde(rename = "_id")]
    pub id: Id,
    pub tuit: Reference<Tuit>,
    pub unliked_by: Reference<User>,
}

impl Record for Unlike {
    const COLLECTION: &'static str = "unlikes";
    const OBJECT_ID_FIELDS: &'static [&'static str] = &["tuit", "unlikedBy"];

    fn id(&self) -> &Id {
        &self.id
    }
}

impl Relationship for Unlike {
    type Source = User;
    type Target = Tuit;

    const SOURCE_FIELD: &'static str = "unlikedBy";
    const TARGET_FIELD: &'static str = "tuit";

    fn new(source: Id, target: Id) -> Self {
        Self {
            id: Id::new(),
            tuit: Reference::Id(target),
            unliked_by: Reference::Id(source),
        }
    }

    fn source_mut(&mut self) -> &mut Reference<User> {
        &mut self.unliked_by
    }

    fn target_mut(&mut self) -> &mut Reference<Tuit> {
        &mut self.tuit
    }
}
