//! Data access for direct messages

use chrono::{DateTime, Utc};

use crate::core::error::Result;
use crate::core::types::Id;
use crate::models::Message;
use crate::storage::{Collection, DeleteResult, Filter, SharedStore};

/// Data access for the `messages` collection.
///
/// Message lists are returned as stored; sender and receiver stay ids.
#[derive(Clone)]
pub struct MessageDao {
    messages: Collection<Message>,
}

impl MessageDao {
    pub fn new(store: SharedStore) -> Self {
        Self {
            messages: Collection::new(store),
        }
    }

    /// Store a message from `sid` to `rid`. Identical messages are stored
    /// as separate documents.
    pub async fn user_messages_user(
        &self,
        sid: &str,
        rid: &str,
        message: &str,
        sent_at: DateTime<Utc>,
    ) -> Result<Message> {
        let message = Message::new(Id::parse(sid)?, Id::parse(rid)?, message, sent_at);
        self.messages.insert(message).await
    }

    pub async fn user_deletes_message(&self, mid: &str) -> Result<DeleteResult> {
        self.messages
            .delete_one(&Filter::by_id(&Id::parse(mid)?))
            .await
    }

    pub async fn find_all_messages_sent_by_user(&self, uid: &str) -> Result<Vec<Message>> {
        let filter = Filter::new().eq("sender", Id::parse(uid)?);
        self.messages.find(&filter).await
    }

    pub async fn find_all_messages_received_by_user(&self, uid: &str) -> Result<Vec<Message>> {
        let filter = Filter::new().eq("receiver", Id::parse(uid)?);
        self.messages.find(&filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_sent_and_received_filters() {
        let messages = MessageDao::new(Arc::new(MemStore::new()));
        let (s1, r1, r2) = (Id::new().to_hex(), Id::new().to_hex(), Id::new().to_hex());
        let now = Utc::now();

        messages.user_messages_user(&s1, &r1, "hi", now).await.unwrap();
        messages.user_messages_user(&s1, &r2, "yo", now).await.unwrap();
        messages.user_messages_user(&r1, &s1, "hey", now).await.unwrap();

        let sent = messages.find_all_messages_sent_by_user(&s1).await.unwrap();
        assert_eq!(sent.len(), 2);
        assert!(sent.iter().all(|m| m.sender.id().to_hex() == s1));

        let received = messages
            .find_all_messages_received_by_user(&s1)
            .await
            .unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].message, "hey");
    }

    #[tokio::test]
    async fn test_identical_messages_are_distinct() {
        let messages = MessageDao::new(Arc::new(MemStore::new()));
        let (s1, r1) = (Id::new().to_hex(), Id::new().to_hex());
        let now = Utc::now();

        let first = messages.user_messages_user(&s1, &r1, "hi", now).await.unwrap();
        let second = messages.user_messages_user(&s1, &r1, "hi", now).await.unwrap();
        assert_ne!(first.id, second.id);

        let result = messages
            .user_deletes_message(&first.id.to_hex())
            .await
            .unwrap();
        assert_eq!(result.deleted_count, 1);

        let sent = messages.find_all_messages_sent_by_user(&s1).await.unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].id, second.id);
    }
}
