//! Direct messages between users

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::User;
use crate::core::types::{Id, Reference};
use crate::storage::Record;

/// A message from `sender` to `receiver`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(rename = "_id")]
    pub id: Id,
    pub message: String,
    pub sender: Reference<User>,
    pub receiver: Reference<User>,
    pub sent_at: DateTime<Utc>,
}

impl Message {
    /// A new, unsaved message
    pub fn new(
        sender: Id,
        receiver: Id,
        message: impl Into<String>,
        sent_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Id::new(),
            message: message.into(),
            sender: Reference::Id(sender),
            receiver: Reference::Id(receiver),
            sent_at,
        }
    }
}

impl Record for Message {
    const COLLECTION: &'static str = "messages";
    const OBJECT_ID_FIELDS: &'static [&'static str] = &["sender", "receiver"];
    const DATE_FIELDS: &'static [&'static str] = &["sentAt"];

    fn id(&self) -> &Id {
        &self.id
    }
}
