//! MongoDB document store
//!
//! Documents stay JSON above this layer. On the way in, `_id` and every
//! reference field a model declares become BSON ObjectIds, and its date fields
//! become BSON dates, so collections hold the same layout as any other client
//! of the database. On the way out both are turned back into hex and RFC 3339
//! strings.

use async_trait::async_trait;
use chrono::SecondsFormat;
use futures_util::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId, Bson};
use mongodb::{Client, Database};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info};

use super::{
    Condition, DeleteResult, Document, DocumentStore, Filter, Record, UpdateResult, ID_FIELD,
};
use crate::core::config::StorageType;
use crate::core::error::{Result, StorageError};
use crate::models::{Bookmark, Dislike, Follow, Like, Message, Tuit, Unlike, User};

/// Store backed by a MongoDB database
#[derive(Debug, Clone)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Connect to `uri` and use the database `name`.
    ///
    /// The driver connects lazily, so this succeeds without a reachable
    /// server as long as the connection string parses.
    pub async fn connect(uri: &str, name: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(StorageError::from)?;
        info!("MongoDB client created for database {}", name);

        Ok(Self {
            database: client.database(name),
        })
    }

    fn collection(&self, name: &str) -> mongodb::Collection<bson::Document> {
        self.database.collection(name)
    }
}

/// BSON types of the typed fields of one collection
#[derive(Debug, Clone, Copy, Default)]
struct FieldTypes {
    object_ids: &'static [&'static str],
    dates: &'static [&'static str],
}

static FIELD_TYPES: Lazy<HashMap<&'static str, FieldTypes>> = Lazy::new(|| {
    HashMap::from([
        FieldTypes::entry::<User>(),
        FieldTypes::entry::<Tuit>(),
        FieldTypes::entry::<Message>(),
        FieldTypes::entry::<Follow>(),
        FieldTypes::entry::<Bookmark>(),
        FieldTypes::entry::<Like>(),
        FieldTypes::entry::<Dislike>(),
        FieldTypes::entry::<Unlike>(),
    ])
});

impl FieldTypes {
    fn entry<T: Record>() -> (&'static str, Self) {
        (
            T::COLLECTION,
            Self {
                object_ids: T::OBJECT_ID_FIELDS,
                dates: T::DATE_FIELDS,
            },
        )
    }

    /// Typing for `collection`; unknown collections only type `_id`
    fn of(collection: &str) -> Self {
        FIELD_TYPES.get(collection).copied().unwrap_or_default()
    }

    fn is_object_id(&self, field: &str) -> bool {
        field == ID_FIELD || self.object_ids.iter().any(|&name| name == field)
    }

    fn is_date(&self, field: &str) -> bool {
        self.dates.iter().any(|&name| name == field)
    }
}

fn to_bson_value(types: FieldTypes, field: &str, value: &Value) -> Result<Bson> {
    if let Value::String(text) = value {
        if types.is_object_id(field) {
            if let Ok(oid) = ObjectId::parse_str(text) {
                return Ok(Bson::ObjectId(oid));
            }
        } else if types.is_date(field) {
            if let Ok(date) = chrono::DateTime::parse_from_rfc3339(text) {
                return Ok(Bson::DateTime(bson::DateTime::from_chrono(date)));
            }
        }
    }
    Ok(bson::to_bson(value).map_err(StorageError::from)?)
}

fn to_bson_document(types: FieldTypes, document: &Document) -> Result<bson::Document> {
    let mut converted = bson::Document::new();
    for (field, value) in document {
        converted.insert(field.clone(), to_bson_value(types, field, value)?);
    }
    Ok(converted)
}

fn to_json_value(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(date) => {
            Value::String(date.to_chrono().to_rfc3339_opts(SecondsFormat::Millis, true))
        }
        Bson::Document(document) => Value::Object(from_bson_document(document)),
        Bson::Array(values) => Value::Array(values.into_iter().map(to_json_value).collect()),
        other => other.into_relaxed_extjson(),
    }
}

fn from_bson_document(document: bson::Document) -> Document {
    document
        .into_iter()
        .map(|(field, value)| (field, to_json_value(value)))
        .collect()
}

fn to_bson_filter(types: FieldTypes, filter: &Filter) -> Result<bson::Document> {
    let mut query = bson::Document::new();
    for (field, condition) in filter.clauses() {
        let value = match condition {
            Condition::Eq(value) => to_bson_value(types, field, value)?,
            Condition::In(values) => {
                let values = values
                    .iter()
                    .map(|value| to_bson_value(types, field, value))
                    .collect::<Result<Vec<Bson>>>()?;
                Bson::Document(doc! { "$in": values })
            }
        };
        query.insert(field.clone(), value);
    }
    Ok(query)
}

#[async_trait]
impl DocumentStore for MongoStore {
    fn storage_type(&self) -> StorageType {
        StorageType::Mongo
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<()> {
        let document = to_bson_document(FieldTypes::of(collection), &document)?;
        self.collection(collection)
            .insert_one(document, None)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }

    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>> {
        let query = to_bson_filter(FieldTypes::of(collection), filter)?;
        debug!("find {} {}", collection, query);
        let documents: Vec<bson::Document> = self
            .collection(collection)
            .find(query, None)
            .await
            .map_err(StorageError::from)?
            .try_collect()
            .await
            .map_err(StorageError::from)?;

        Ok(documents.into_iter().map(from_bson_document).collect())
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Document>> {
        let query = to_bson_filter(FieldTypes::of(collection), filter)?;
        Ok(self
            .collection(collection)
            .find_one(query, None)
            .await
            .map_err(StorageError::from)?
            .map(from_bson_document))
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        changes: Document,
    ) -> Result<UpdateResult> {
        let query = to_bson_filter(FieldTypes::of(collection), filter)?;
        let changes = to_bson_document(FieldTypes::of(collection), &changes)?;
        let result = self
            .collection(collection)
            .update_one(query, doc! { "$set": changes }, None)
            .await
            .map_err(StorageError::from)?;

        Ok(UpdateResult {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<DeleteResult> {
        let query = to_bson_filter(FieldTypes::of(collection), filter)?;
        let result = self
            .collection(collection)
            .delete_one(query, None)
            .await
            .map_err(StorageError::from)?;

        Ok(DeleteResult::deleted(result.deleted_count))
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64> {
        let query = to_bson_filter(FieldTypes::of(collection), filter)?;
        Ok(self
            .collection(collection)
            .count_documents(query, None)
            .await
            .map_err(StorageError::from)?)
    }

    async fn ping(&self) -> Result<()> {
        self.database
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Id, Reference};
    use crate::storage::into_document;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn test_filter_translation() {
        let follower = Id::new();
        let filter = Filter::new()
            .eq("userFollowing", &follower)
            .any_of("_id", ["a", "b"]);

        let query = to_bson_filter(FieldTypes::of(Follow::COLLECTION), &filter).unwrap();
        assert_eq!(
            query,
            doc! {
                "userFollowing": ObjectId::parse_str(follower.to_hex()).unwrap(),
                "_id": { "$in": ["a", "b"] },
            }
        );
    }

    #[test]
    fn test_id_filter_uses_object_ids() {
        let id = Id::new();
        let query = to_bson_filter(FieldTypes::of("anything"), &Filter::by_id(&id)).unwrap();
        assert_eq!(query.get_object_id("_id").unwrap().to_hex(), id.to_hex());
    }

    #[test]
    fn test_reads_documents_written_by_other_clients() {
        let (id, follower, followed) = (ObjectId::new(), ObjectId::new(), ObjectId::new());
        let stored = doc! {
            "_id": id,
            "userFollowing": follower,
            "userFollowed": followed,
            "__v": 0,
        };

        let follow: Follow =
            serde_json::from_value(Value::Object(from_bson_document(stored))).unwrap();
        assert_eq!(follow.id.to_hex(), id.to_hex());
        assert_eq!(follow.user_following.id().to_hex(), follower.to_hex());
        assert_eq!(follow.user_followed.id().to_hex(), followed.to_hex());
    }

    #[test]
    fn test_bson_dates_decode_into_timestamps() {
        let sent_at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let stored = doc! {
            "_id": ObjectId::new(),
            "message": "hi",
            "sender": ObjectId::new(),
            "receiver": ObjectId::new(),
            "sentAt": bson::DateTime::from_millis(1_700_000_000_123),
        };

        let message: Message =
            serde_json::from_value(Value::Object(from_bson_document(stored))).unwrap();
        assert_eq!(message.sent_at, sent_at);
        assert_eq!(message.message, "hi");
    }

    #[test]
    fn test_records_are_written_with_bson_types() {
        let author = Id::new();
        // Text that happens to look like an ObjectId stays text
        let tuit = Tuit::new(author, "0123456789abcdef01234567");
        let document = into_document(&tuit).unwrap();

        let stored = to_bson_document(FieldTypes::of(Tuit::COLLECTION), &document).unwrap();
        assert_eq!(stored.get_object_id("_id").unwrap().to_hex(), tuit.id.to_hex());
        assert_eq!(stored.get_object_id("postedBy").unwrap().to_hex(), author.to_hex());
        assert!(stored.get_datetime("postedOn").is_ok());
        assert_eq!(stored.get_str("tuit").unwrap(), "0123456789abcdef01234567");

        let back: Tuit = serde_json::from_value(Value::Object(from_bson_document(stored))).unwrap();
        assert_eq!(back.id, tuit.id);
        assert_eq!(back.tuit, tuit.tuit);
        assert!(matches!(back.posted_by, Reference::Id(id) if id == author));
        assert_eq!(
            back.posted_on.timestamp_millis(),
            tuit.posted_on.timestamp_millis()
        );
    }

    #[test]
    fn test_untyped_fields_keep_their_shape() {
        let document = match json!({"_id": "x", "tuit": "hello", "n": 3, "tags": ["a"]}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };

        let bson_document = to_bson_document(FieldTypes::default(), &document).unwrap();
        assert_eq!(bson_document.get_str("_id").unwrap(), "x");

        let back = from_bson_document(bson_document);
        assert_eq!(back, document);
    }

    #[tokio::test]
    async fn test_connect_rejects_malformed_uri() {
        assert!(MongoStore::connect("not a uri", "tuiter").await.is_err());
    }
}
