//! Tuits: short posts written by users

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::User;
use crate::core::types::{Id, Reference};
use crate::storage::Record;

/// A post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tuit {
    #[serde(rename = "_id")]
    pub id: Id,
    /// Post text
    pub tuit: String,
    /// Author
    pub posted_by: Reference<User>,
    pub posted_on: DateTime<Utc>,
}

/// Body of a create-tuit request
#[derive(Debug, Clone, Deserialize)]
pub struct NewTuit {
    pub tuit: String,
}

/// Body of an update-tuit request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TuitChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_on: Option<DateTime<Utc>>,
}

impl Tuit {
    /// A new tuit by `author`, posted now
    pub fn new(author: Id, tuit: impl Into<String>) -> Self {
        Self {
            id: Id::new(),
            tuit: tuit.into(),
            posted_by: Reference::Id(author),
            posted_on: Utc::now(),
        }
    }
}

impl Record for Tuit {
    const COLLECTION: &'static str = "tuits";
    const OBJECT_ID_FIELDS: &'static [&'static str] = &["postedBy"];
    const DATE_FIELDS: &'static [&'static str] = &["postedOn"];

    fn id(&self) -> &Id {
        &self.id
    }
}
